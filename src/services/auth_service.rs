use bcrypt::{hash, verify};

use crate::{
    db::enums::UserRole,
    db::models::user::{LoginRequest, LoginResponse, NewUser, RegisterRequest, User},
    db::store::Store,
    error::{AppError, AppResult},
    middleware::TokenService,
    validation::rules::parse_enum,
};

const BAD_CREDENTIALS: &str = "Invalid email or password";

pub struct AuthService;

impl AuthService {
    pub fn register(store: &dyn Store, req: RegisterRequest, bcrypt_cost: u32) -> AppResult<User> {
        let email = normalize_email(&req.email);
        let role = match req.role {
            Some(raw) => parse_enum::<UserRole>("role", &raw)?,
            None => UserRole::default(),
        };

        // The store also enforces uniqueness on insert.
        if store.find_user_by_email(&email)?.is_some() {
            return Err(AppError::invalid_field(
                "email",
                crate::db::models::api::error_codes::EMAIL_TAKEN,
                "Email is already registered",
            ));
        }

        let password_hash = hash(&req.password, bcrypt_cost)?;
        let user = store.insert_user(NewUser::new(email, password_hash, req.name, role))?;
        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    pub fn login(
        store: &dyn Store,
        tokens: &TokenService,
        req: LoginRequest,
    ) -> AppResult<LoginResponse> {
        let user = store
            .find_user_by_email(&normalize_email(&req.email))?
            .ok_or_else(|| AppError::unauthorized(BAD_CREDENTIALS))?;

        if !verify(&req.password, &user.password_hash)? {
            return Err(AppError::unauthorized(BAD_CREDENTIALS));
        }

        let access_token = tokens.issue_token(&user)?;
        Ok(LoginResponse {
            access_token,
            token_type: "bearer".to_string(),
            expires_in: tokens.expires_in(),
            user,
        })
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
