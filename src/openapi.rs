use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lokaly API",
        version = "1.0.0",
        description = "Backend API do Lokaly - aluguel de imóveis para locatários e locadores",
        contact(
            name = "Lokaly Team",
            email = "suporte@lokaly.app"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    tags(
        (name = "auth", description = "Login, logout e sessão"),
        (name = "tenant", description = "Início do locatário"),
        (name = "landlord", description = "Imóveis e moradores do locador"),
        (name = "bills", description = "Boletos e comprovantes"),
        (name = "complaints", description = "Chamados de manutenção"),
        (name = "support", description = "Chat de suporte"),
        (name = "profile", description = "Perfil do usuário"),
        (name = "files", description = "Arquivos enviados")
    ),
    paths(
        // Auth
        crate::api::auth::login,
        crate::api::auth::logout,
        crate::api::auth::get_session,
        // Tenant
        crate::api::tenant::dashboard,
        crate::api::bills::list_tenant_bills,
        crate::api::bills::get_tenant_bill,
        crate::api::bills::upload_receipt,
        crate::api::complaints::list_tenant_complaints,
        crate::api::complaints::create_complaint,
        crate::api::complaints::get_tenant_complaint,
        crate::api::complaints::upload_complaint_image,
        crate::api::support::get_messages,
        crate::api::support::send_message,
        // Landlord
        crate::api::landlord::dashboard,
        crate::api::landlord::list_properties,
        crate::api::landlord::list_tenants,
        crate::api::complaints::list_landlord_complaints,
        crate::api::complaints::get_landlord_complaint,
        crate::api::complaints::add_reply,
        crate::api::complaints::update_complaint_status,
        crate::api::bills::list_landlord_bills,
        crate::api::bills::overdue_sweep,
        // Profile
        crate::api::users::get_profile,
        crate::api::users::update_profile,
        crate::api::users::upload_avatar,
        crate::api::users::update_notifications,
        // Files
        crate::api::files::get_file,
    ),
    components(
        schemas(
            // Auth
            crate::models::LoginRequest,
            crate::models::LoginResponse,
            crate::models::SessionResponse,
            crate::models::UserPublic,
            crate::models::UserRole,
            crate::navigation::ScreenResponse,
            crate::api::auth::LogoutResponse,
            // Cards
            crate::cards::CardAction,
            crate::cards::BillCard,
            crate::cards::ComplaintCard,
            crate::cards::PropertyCard,
            crate::models::StatusBadge,
            crate::models::FilterChip,
            crate::models::StatusCount,
            // Dashboards
            crate::models::TenantDashboardResponse,
            crate::models::LandlordDashboardResponse,
            crate::models::TenantSummary,
            // Bills
            crate::models::BillStatus,
            crate::models::Receipt,
            crate::models::BillSummary,
            crate::models::BillListResponse,
            crate::models::BillDetailResponse,
            crate::models::ReceiptUploadResponse,
            crate::models::OverdueSweepRequest,
            crate::models::OverdueSweepResponse,
            // Complaints
            crate::models::ComplaintStatus,
            crate::models::CreateComplaintRequest,
            crate::models::CreateComplaintResponse,
            crate::models::ComplaintListResponse,
            crate::models::ComplaintDetailResponse,
            crate::models::ComplaintReplyView,
            crate::models::AddReplyRequest,
            crate::models::UpdateComplaintStatusRequest,
            crate::models::ImageUploadResponse,
            // Support
            crate::models::MessageSender,
            crate::models::SupportMessage,
            crate::models::SupportThreadResponse,
            crate::models::SendSupportMessageRequest,
            crate::models::SendSupportMessageResponse,
            // Profile
            crate::models::UpdateProfileRequest,
            crate::models::NotificationSettingsRequest,
            crate::models::AvatarUploadResponse,
        )
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::Http::new(
                        utoipa::openapi::security::HttpAuthScheme::Bearer,
                    ),
                ),
            );
        }
    }
}
