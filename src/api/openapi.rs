//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    account_handler, appointment_handler, auth_handler, group_handler, messaging_handler,
    provider_handler, slot_handler,
};
use crate::domain::{
    AccountResponse, AccountRole, Appointment, AppointmentKind, AppointmentView,
    ClientDetail, Contact, DirectMessage, FriendRequestView, Group, GroupMessage, GroupView,
    Invitation, InvitationStatus, InvitationView, InviteOutcome, ProviderDetail, ProviderProfile,
    Specialty, TimeSlot,
};
use crate::services::{ProfileView, ProviderPage, TokenResponse};
use crate::types::MessageResponse;

/// OpenAPI documentation for CalmSeek
#[derive(OpenApi)]
#[openapi(
    info(
        title = "CalmSeek",
        version = "0.1.0",
        description = "Mental-health appointment scheduling service",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::register_user,
        auth_handler::register_provider,
        auth_handler::login,
        auth_handler::password_reset_request,
        auth_handler::password_reset_confirm,
        // Account endpoints
        account_handler::my_profile,
        account_handler::update_profile,
        account_handler::list_favorites,
        account_handler::add_favorite,
        account_handler::remove_favorite,
        // Provider directory endpoints
        provider_handler::browse_providers,
        provider_handler::provider_detail,
        // Slot endpoints
        slot_handler::list_slots,
        slot_handler::create_slot,
        slot_handler::create_recurring_slots,
        slot_handler::my_slots,
        slot_handler::delete_slot,
        // Appointment endpoints
        appointment_handler::book_appointment,
        appointment_handler::my_appointments,
        appointment_handler::cancel_appointment,
        appointment_handler::reschedule_appointment,
        // Messaging endpoints
        messaging_handler::list_friends,
        messaging_handler::list_requests,
        messaging_handler::send_request,
        messaging_handler::accept_request,
        messaging_handler::remove_friend,
        messaging_handler::send_message,
        messaging_handler::conversation,
        // Group endpoints
        group_handler::my_groups,
        group_handler::create_group,
        group_handler::group_detail,
        group_handler::delete_group,
        group_handler::post_group_message,
        group_handler::invite_members,
        group_handler::my_invitations,
        group_handler::respond_to_invitation,
        group_handler::quit_group,
    ),
    components(
        schemas(
            // Domain types
            AccountRole,
            AccountResponse,
            Specialty,
            ProviderDetail,
            ClientDetail,
            ProviderProfile,
            TimeSlot,
            Appointment,
            AppointmentKind,
            AppointmentView,
            Contact,
            DirectMessage,
            FriendRequestView,
            Group,
            GroupMessage,
            GroupView,
            Invitation,
            InvitationStatus,
            InvitationView,
            InviteOutcome,
            // Service views
            ProfileView,
            ProviderPage,
            TokenResponse,
            MessageResponse,
            // Request types
            auth_handler::RegisterUserRequest,
            auth_handler::RegisterProviderRequest,
            auth_handler::LoginRequest,
            auth_handler::PasswordResetRequest,
            auth_handler::PasswordResetConfirm,
            account_handler::UpdateProfileRequest,
            account_handler::ProviderDetailRequest,
            account_handler::ClientDetailRequest,
            slot_handler::CreateSlotRequest,
            slot_handler::CreateRecurringSlotsRequest,
            appointment_handler::BookAppointmentRequest,
            appointment_handler::RescheduleRequest,
            messaging_handler::FriendRequestPayload,
            messaging_handler::SendMessageRequest,
            group_handler::CreateGroupRequest,
            group_handler::InviteRequest,
            group_handler::RespondRequest,
            group_handler::PostGroupMessageRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration with role selection, login, password reset"),
        (name = "Accounts", description = "Own profile and favorites"),
        (name = "Providers", description = "Provider directory"),
        (name = "Slots", description = "Provider-published time slots"),
        (name = "Appointments", description = "Booking lifecycle"),
        (name = "Messaging", description = "Friendships and direct messages"),
        (name = "Groups", description = "Groups and invitations")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /auth/login"))
                        .build(),
                ),
            );
        }
    }
}
