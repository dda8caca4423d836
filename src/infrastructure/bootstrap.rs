//! Deployment defaults
//!
//! New members must land in a configured default state, and auto-provisioned
//! groups need a default type. Run this once at startup; [`add_member`]
//! treats a missing default state as a fatal configuration error rather
//! than creating a member with no state.
//!
//! [`add_member`]: crate::infrastructure::member::MembershipService::add_member

use tracing::info;

use crate::config::DefaultsConfig;
use crate::domain::DomainError;
use crate::infrastructure::group::GroupService;
use crate::infrastructure::member::MembershipService;

/// Ensure the configured default group type and default membership state
/// exist. Idempotent; safe to run on every startup.
pub async fn ensure_defaults(
    config: &DefaultsConfig,
    groups: &GroupService,
    memberships: &MembershipService,
) -> Result<(), DomainError> {
    info!(
        group_type = %config.group_type_name,
        member_state = %config.member_state,
        "Ensuring deployment defaults"
    );

    groups.ensure_default_type(&config.group_type_name).await?;
    memberships
        .ensure_default_state(config.member_state)
        .await?;

    Ok(())
}
