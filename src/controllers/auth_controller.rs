use tracing::{info, warn};

use crate::dto::auth_dto::{AuthResponse, LoginRequest, RegisterRequest};
use crate::models::account::{NewAccount, Role};
use crate::repositories::AccountRepository;
use crate::services::auth_service::{self, AuthError};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{generate_token, JwtConfig};

pub struct AuthController {
    accounts: AccountRepository,
    jwt: JwtConfig,
    bcrypt_cost: u32,
}

impl AuthController {
    pub fn new(state: &AppState) -> Self {
        Self {
            accounts: AccountRepository::new(state.pool.clone()),
            jwt: state.jwt.clone(),
            bcrypt_cost: state.config.bcrypt_cost,
        }
    }

    /// Registrar un cliente nuevo y devolver su token
    pub async fn register(&self, request: RegisterRequest) -> Result<AuthResponse, AppError> {
        let existing = self.accounts.find_by_email(Role::User, &request.email).await?;
        auth_service::ensure_email_available(existing.as_ref())?;

        let password_hash = auth_service::hash_password(&request.password, self.bcrypt_cost)?;

        let account = self
            .accounts
            .create(NewAccount {
                role: Role::User,
                full_name: request.full_name,
                email: request.email,
                password_hash,
                phone_number: request.phone_number,
                address: request.address,
            })
            .await
            .map_err(|e| {
                // dos registros simultáneos con el mismo email
                if e.is_unique_violation() {
                    AuthError::DuplicateEmail.into()
                } else {
                    e
                }
            })?;

        info!("✅ Cuenta registrada: id={}", account.id);

        let token = generate_token(account.id, &account.email, account.role, &self.jwt)?;
        Ok(AuthResponse::new(&account, token))
    }

    /// Login contra el pool de cuentas del rol indicado
    pub async fn login(&self, role: Role, request: LoginRequest) -> Result<AuthResponse, AppError> {
        let account = self.accounts.find_by_email(role, &request.email).await?;

        let account = auth_service::verify_credentials(account, &request.password).map_err(|e| {
            warn!("🔒 Login {} rechazado: {}", role, e);
            e
        })?;

        info!("✅ Login {} correcto: id={}", role, account.id);

        let token = generate_token(account.id, &account.email, account.role, &self.jwt)?;
        Ok(AuthResponse::new(&account, token))
    }
}
