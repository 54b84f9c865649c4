//! Role router: each role sees exactly one of two disjoint screen trees.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::cards::API_PREFIX;
use crate::error::{AppError, AppResult};
use crate::models::UserRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    TenantHome,
    TenantBills,
    TenantComplaints,
    TenantSupport,
    TenantProfile,
    LandlordHome,
    LandlordProperties,
    LandlordTenants,
    LandlordComplaints,
    LandlordBills,
    LandlordProfile,
}

pub const TENANT_SCREENS: [Screen; 5] = [
    Screen::TenantHome,
    Screen::TenantBills,
    Screen::TenantComplaints,
    Screen::TenantSupport,
    Screen::TenantProfile,
];

pub const LANDLORD_SCREENS: [Screen; 6] = [
    Screen::LandlordHome,
    Screen::LandlordProperties,
    Screen::LandlordTenants,
    Screen::LandlordComplaints,
    Screen::LandlordBills,
    Screen::LandlordProfile,
];

impl Screen {
    pub fn role(&self) -> UserRole {
        match self {
            Screen::TenantHome
            | Screen::TenantBills
            | Screen::TenantComplaints
            | Screen::TenantSupport
            | Screen::TenantProfile => UserRole::Tenant,
            Screen::LandlordHome
            | Screen::LandlordProperties
            | Screen::LandlordTenants
            | Screen::LandlordComplaints
            | Screen::LandlordBills
            | Screen::LandlordProfile => UserRole::Landlord,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Screen::TenantHome | Screen::LandlordHome => "home",
            Screen::TenantBills | Screen::LandlordBills => "bills",
            Screen::TenantComplaints | Screen::LandlordComplaints => "complaints",
            Screen::TenantSupport => "support",
            Screen::TenantProfile | Screen::LandlordProfile => "profile",
            Screen::LandlordProperties => "properties",
            Screen::LandlordTenants => "tenants",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Screen::TenantHome | Screen::LandlordHome => "Início",
            Screen::TenantBills | Screen::LandlordBills => "Boletos",
            Screen::TenantComplaints | Screen::LandlordComplaints => "Chamados",
            Screen::TenantSupport => "Suporte",
            Screen::TenantProfile | Screen::LandlordProfile => "Perfil",
            Screen::LandlordProperties => "Imóveis",
            Screen::LandlordTenants => "Moradores",
        }
    }

    pub fn path(&self) -> String {
        let leaf = match self.key() {
            "home" => "dashboard",
            "support" => "support/messages",
            other => other,
        };
        format!("{}/{}/{}", API_PREFIX, self.role().as_str(), leaf)
    }
}

pub fn screens_for(role: UserRole) -> &'static [Screen] {
    match role {
        UserRole::Tenant => &TENANT_SCREENS,
        UserRole::Landlord => &LANDLORD_SCREENS,
    }
}

pub fn home_for(role: UserRole) -> String {
    screens_for(role)[0].path()
}

/// Route-boundary check: the session role must own the screen tree.
pub fn authorize(role: UserRole, required: UserRole) -> AppResult<()> {
    if role == required {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScreenResponse {
    pub key: String,
    pub title: String,
    pub path: String,
}

impl From<Screen> for ScreenResponse {
    fn from(screen: Screen) -> Self {
        Self {
            key: screen.key().to_string(),
            title: screen.title().to_string(),
            path: screen.path(),
        }
    }
}

pub fn screen_list(role: UserRole) -> Vec<ScreenResponse> {
    screens_for(role).iter().copied().map(ScreenResponse::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_sets_are_disjoint() {
        assert!(TENANT_SCREENS.iter().all(|s| s.role() == UserRole::Tenant));
        assert!(LANDLORD_SCREENS.iter().all(|s| s.role() == UserRole::Landlord));
        assert!(TENANT_SCREENS.iter().all(|s| !LANDLORD_SCREENS.contains(s)));

        let tenant_paths: Vec<String> = TENANT_SCREENS.iter().map(|s| s.path()).collect();
        assert!(LANDLORD_SCREENS
            .iter()
            .all(|s| !tenant_paths.contains(&s.path())));
    }

    #[test]
    fn test_tabs_match_client() {
        let tenant: Vec<&str> = screens_for(UserRole::Tenant).iter().map(|s| s.title()).collect();
        assert_eq!(tenant, vec!["Início", "Boletos", "Chamados", "Suporte", "Perfil"]);

        let landlord: Vec<&str> = screens_for(UserRole::Landlord).iter().map(|s| s.key()).collect();
        assert_eq!(
            landlord,
            vec!["home", "properties", "tenants", "complaints", "bills", "profile"]
        );
    }

    #[test]
    fn test_home_paths() {
        assert_eq!(home_for(UserRole::Tenant), "/api/v1/tenant/dashboard");
        assert_eq!(home_for(UserRole::Landlord), "/api/v1/landlord/dashboard");
        assert_eq!(Screen::TenantSupport.path(), "/api/v1/tenant/support/messages");
    }

    #[test]
    fn test_cross_role_access_is_forbidden() {
        assert!(authorize(UserRole::Tenant, Screen::TenantBills.role()).is_ok());
        assert!(matches!(
            authorize(UserRole::Tenant, Screen::LandlordTenants.role()),
            Err(AppError::Forbidden)
        ));
        assert!(matches!(
            authorize(UserRole::Landlord, UserRole::Tenant),
            Err(AppError::Forbidden)
        ));
    }
}
