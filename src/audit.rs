use serde_json::Value;

use crate::middleware::auth::AuthUser;

/// Records an administrative mutation as a structured event on the `audit` target.
pub fn log_audit(actor: &AuthUser, action: &str, resource: &str, metadata: Option<Value>) {
    let metadata = metadata.unwrap_or(Value::Null);
    tracing::info!(
        target: "audit",
        actor = %actor.user_id,
        role = actor.role.as_str(),
        action,
        resource,
        %metadata,
        "audit"
    );
}
