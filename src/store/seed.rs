//! Sample data matching the mobile client's demo screens.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::StoreData;
use crate::error::{AppError, AppResult};
use crate::models::{
    Bill, BillStatus, Complaint, ComplaintReply, ComplaintStatus, Property, User, UserRole,
};
use crate::services::AuthService;

pub const DEMO_PASSWORD: &str = "123456";

fn day(value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%d/%m/%Y")
        .map_err(|e| AppError::Internal(format!("bad seed date {}: {}", value, e)))
}

fn user(name: &str, email: &str, role: UserRole, phone: &str, password_hash: &str) -> User {
    let now = Utc::now();
    User {
        id: Uuid::new_v4(),
        name: name.to_string(),
        email: email.to_string(),
        role,
        profile_image: None,
        phone: Some(phone.to_string()),
        notifications_enabled: true,
        password_hash: password_hash.to_string(),
        created_at: now,
        updated_at: now,
    }
}

fn bill(
    tenant: &User,
    property: &Property,
    description: &str,
    amount: Decimal,
    due: &str,
    status: BillStatus,
    paid: Option<&str>,
) -> AppResult<Bill> {
    Ok(Bill {
        id: Uuid::new_v4(),
        tenant_id: tenant.id,
        property_id: property.id,
        description: description.to_string(),
        amount,
        due_date: day(due)?,
        status,
        paid_date: paid.map(day).transpose()?,
        receipt: None,
        created_at: Utc::now(),
    })
}

fn landlord_reply(message: &str, date: &str) -> AppResult<ComplaintReply> {
    Ok(ComplaintReply {
        id: Uuid::new_v4(),
        message: message.to_string(),
        date: day(date)?,
        is_landlord: true,
    })
}

pub fn demo_data() -> AppResult<StoreData> {
    // One hash shared by the demo accounts; they all use the same password.
    let password_hash = AuthService::hash_password(DEMO_PASSWORD)?;

    let landlord = user(
        "Imobiliária ABC",
        "locador@example.com",
        UserRole::Landlord,
        "(81) 3456-7890",
        &password_hash,
    );
    let joao = user(
        "João Silva",
        "locatario@example.com",
        UserRole::Tenant,
        "(11) 98765-4321",
        &password_hash,
    );
    let maria = user(
        "Maria Pereira",
        "maria@example.com",
        UserRole::Tenant,
        "(81) 99876-5432",
        &password_hash,
    );

    let flores = Property {
        id: Uuid::new_v4(),
        landlord_id: landlord.id,
        tenant_id: Some(joao.id),
        name: "Residencial Flores, Nº 302".to_string(),
        address: "Rua das Acácias, Xique-Xique, Jupi-PE".to_string(),
        image_url: "https://images.pexels.com/photos/1396122/pexels-photo-1396122.jpeg"
            .to_string(),
        bedrooms: 4,
        bathrooms: 2,
        area: 147,
        rent: Decimal::new(185000, 2),
    };
    let parque = Property {
        id: Uuid::new_v4(),
        landlord_id: landlord.id,
        tenant_id: Some(maria.id),
        name: "Residencial Parque, Apt 105".to_string(),
        address: "Av. das Palmeiras, 210, Jupi-PE".to_string(),
        image_url: "https://images.pexels.com/photos/106399/pexels-photo-106399.jpeg"
            .to_string(),
        bedrooms: 2,
        bathrooms: 1,
        area: 68,
        rent: Decimal::new(120000, 2),
    };
    let vacant = Property {
        id: Uuid::new_v4(),
        landlord_id: landlord.id,
        tenant_id: None,
        name: "Residencial Flores, Nº 101".to_string(),
        address: "Rua das Acácias, Xique-Xique, Jupi-PE".to_string(),
        image_url: "https://images.pexels.com/photos/1396132/pexels-photo-1396132.jpeg"
            .to_string(),
        bedrooms: 3,
        bathrooms: 2,
        area: 110,
        rent: Decimal::new(150000, 2),
    };

    let rent = Decimal::new(185000, 2);
    let condo = Decimal::new(45000, 2);
    let bills = vec![
        bill(&joao, &flores, "Aluguel de Agosto/2025", rent, "05/08/2025", BillStatus::Pending, None)?,
        bill(&joao, &flores, "Aluguel de Julho/2025", rent, "05/07/2025", BillStatus::Paid, Some("03/07/2025"))?,
        bill(&joao, &flores, "Aluguel de Junho/2025", rent, "05/06/2025", BillStatus::Paid, Some("04/06/2025"))?,
        bill(&joao, &flores, "Taxa de Condomínio - Agosto/2025", condo, "10/08/2025", BillStatus::Pending, None)?,
        bill(&joao, &flores, "Taxa de Condomínio - Julho/2025", condo, "10/07/2025", BillStatus::Paid, Some("08/07/2025"))?,
        bill(&maria, &parque, "Aluguel de Agosto/2025", parque.rent, "05/08/2025", BillStatus::Pending, None)?,
        bill(&maria, &parque, "Aluguel de Julho/2025", parque.rent, "05/07/2025", BillStatus::Overdue, None)?,
    ];

    let now = Utc::now();
    let complaints = vec![
        Complaint {
            id: Uuid::new_v4(),
            tenant_id: joao.id,
            property_id: flores.id,
            title: "Vazamento na pia do banheiro".to_string(),
            description: "A pia do banheiro está com um vazamento na conexão com a parede. Já tentei apertar, mas continua pingando.".to_string(),
            date: day("28/07/2025")?,
            status: ComplaintStatus::Processing,
            image_url: Some("https://images.pexels.com/photos/5728342/pexels-photo-5728342.jpeg".to_string()),
            responses: vec![landlord_reply(
                "Iremos enviar um encanador para verificar o problema.",
                "29/07/2025",
            )?],
            created_at: now,
        },
        Complaint {
            id: Uuid::new_v4(),
            tenant_id: joao.id,
            property_id: flores.id,
            title: "Infiltração no teto da sala".to_string(),
            description: "Apareceu uma mancha de umidade no teto da sala, próximo à janela. Parece estar aumentando de tamanho.".to_string(),
            date: day("15/07/2025")?,
            status: ComplaintStatus::Resolved,
            image_url: Some("https://images.pexels.com/photos/5734582/pexels-photo-5734582.jpeg".to_string()),
            responses: vec![landlord_reply(
                "Verificamos e consertamos o vazamento do apartamento superior. A mancha deve secar nos próximos dias.",
                "18/07/2025",
            )?],
            created_at: now,
        },
        Complaint {
            id: Uuid::new_v4(),
            tenant_id: joao.id,
            property_id: flores.id,
            title: "Interruptor da cozinha não funciona".to_string(),
            description: "O interruptor da luz da cozinha parou de funcionar. As lâmpadas estão boas, testei em outros lugares.".to_string(),
            date: day("01/08/2025")?,
            status: ComplaintStatus::New,
            image_url: None,
            responses: Vec::new(),
            created_at: now,
        },
        Complaint {
            id: Uuid::new_v4(),
            tenant_id: maria.id,
            property_id: parque.id,
            title: "Problema com o chuveiro elétrico".to_string(),
            description: "O chuveiro elétrico não esquenta mais a água, mesmo na posição inverno."
                .to_string(),
            date: day("27/07/2025")?,
            status: ComplaintStatus::Processing,
            image_url: None,
            responses: vec![landlord_reply(
                "Um eletricista vai verificar o chuveiro na quinta-feira.",
                "28/07/2025",
            )?],
            created_at: now,
        },
    ];

    Ok(StoreData {
        users: vec![landlord, joao, maria],
        properties: vec![flores, parque, vacant],
        bills,
        complaints,
        ..StoreData::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::count_by_status;

    #[test]
    fn test_demo_bills_match_client_sample() {
        let data = demo_data().unwrap();
        let joao = data.user_by_email("locatario@example.com").unwrap();
        let bills = data.bills_of_tenant(joao.id);

        assert_eq!(count_by_status(bills.iter().copied(), BillStatus::Pending), 2);
        assert_eq!(count_by_status(bills.iter().copied(), BillStatus::Paid), 3);
        assert_eq!(bills[0].due_date, NaiveDate::from_ymd_opt(2025, 8, 5).unwrap());
        assert!(bills
            .iter()
            .all(|bill| bill.paid_date.is_some() == (bill.status == BillStatus::Paid)));
    }

    #[test]
    fn test_demo_accounts_share_password() {
        let data = demo_data().unwrap();
        for user in &data.users {
            assert!(AuthService::verify_password(DEMO_PASSWORD, &user.password_hash).unwrap());
        }
        let roles: Vec<&str> = data.users.iter().map(|u| u.role.as_str()).collect();
        assert_eq!(roles, vec!["landlord", "tenant", "tenant"]);
    }

    #[test]
    fn test_bad_seed_date_is_an_error() {
        assert!(day("2025-08-05").is_err());
        assert_eq!(day("05/08/2025").unwrap().format("%Y-%m-%d").to_string(), "2025-08-05");
    }
}
