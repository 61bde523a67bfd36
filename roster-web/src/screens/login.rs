use roster_gateway::{AuthResult, Session, SessionGateway};
use tracing::{info, warn};

/// Shown for every failed sign-in, whatever the cause.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials. Please try again.";

/// Email/password form state.
#[derive(Debug, Clone, Default)]
pub struct LoginScreen {
    /// Last submitted email, echoed back into the form.
    pub email: String,
    pub error: Option<&'static str>,
}

impl LoginScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn submit(
        &mut self,
        gateway: &dyn SessionGateway,
        email: &str,
        password: &str,
    ) -> AuthResult<Session> {
        self.email = email.to_string();
        match gateway.sign_in(&self.email, password).await {
            Ok(session) => {
                info!("{} signed in via {}", session.email, gateway.provider_name());
                self.error = None;
                Ok(session)
            }
            Err(e) => {
                warn!("Sign-in rejected for {}", self.email);
                self.error = Some(INVALID_CREDENTIALS);
                Err(e)
            }
        }
    }
}
