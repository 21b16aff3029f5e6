//! Account-lifecycle flows.
//!
//! Every flow here is a short-lived state machine over the backing stores;
//! the service keeps no state of its own between calls, so any two calls
//! may run concurrently, including calls for the same username.

use std::sync::Arc;

use tracing::{info, warn};

use peerfeed_auth::{AccountStore, PasswordHasher, PendingAccountStore, SessionDenylist, TokenCodec, TokenKind};
use peerfeed_core::error::AppError;
use peerfeed_core::result::AppResult;
use peerfeed_core::traits::{Clock, MailBody, MailGateway, ProfileIndexer};
use peerfeed_core::types::Notice;
use peerfeed_database::repositories::UserRepository;
use peerfeed_entity::{PendingAccount, User};

use super::types::{SignInOutcome, SignUpRequest};

/// Orchestrates signup, verification, sign-in/out, token refresh, account
/// recovery, and activation.
///
/// Collaborators are constructor-injected; the service is the only
/// component that composes them, and the stores never talk to each other.
#[derive(Debug, Clone)]
pub struct AuthService {
    repo: Arc<dyn UserRepository>,
    codec: Arc<TokenCodec>,
    pending: PendingAccountStore,
    denylist: SessionDenylist,
    accounts: AccountStore,
    hasher: Arc<PasswordHasher>,
    mail: Arc<dyn MailGateway>,
    indexer: Arc<dyn ProfileIndexer>,
    clock: Arc<dyn Clock>,
    /// Application base URL for links embedded in outbound mail.
    base_url: String,
}

impl AuthService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        repo: Arc<dyn UserRepository>,
        codec: Arc<TokenCodec>,
        pending: PendingAccountStore,
        denylist: SessionDenylist,
        accounts: AccountStore,
        hasher: Arc<PasswordHasher>,
        mail: Arc<dyn MailGateway>,
        indexer: Arc<dyn ProfileIndexer>,
        clock: Arc<dyn Clock>,
        base_url: String,
    ) -> Self {
        Self {
            repo,
            codec,
            pending,
            denylist,
            accounts,
            hasher,
            mail,
            indexer,
            clock,
            base_url,
        }
    }

    /// Stages a new account and mails a verification link.
    ///
    /// Nothing is persisted unless the mail goes out: on delivery failure
    /// the flow aborts before the pending write, so no unverifiable staged
    /// account is ever left behind.
    pub async fn sign_up(&self, request: SignUpRequest) -> AppResult<Notice> {
        if self
            .repo
            .find_by_username_or_email(&request.username, &request.email)
            .await?
            .is_some()
        {
            return Err(AppError::account_already_exists("Account already exists"));
        }

        if self.pending.get(&request.username).await?.is_some() {
            return Err(AppError::pending_verification_exists(
                "Account is already created but not verified",
            ));
        }

        let password_hash = self.hasher.hash(&request.password)?;
        let token = self.codec.issue(
            TokenKind::Verification,
            &request.username,
            &request.email,
            None,
        )?;
        let verification_url = format!(
            "{}/auth/sign-up/account-verification?token={token}",
            self.base_url
        );

        self.mail
            .send(&MailBody {
                receiver_email: request.email.clone(),
                receiver_name: request.full_name.clone(),
                subject: format!("Verify Your Account [{}]", request.username),
                text: verification_url,
            })
            .await?;

        self.pending
            .put(&PendingAccount {
                username: request.username.clone(),
                email: request.email,
                full_name: request.full_name,
                password_hash,
                created_at: self.clock.now(),
            })
            .await?;

        info!(username = %request.username, "Staged signup, verification mail sent");
        Ok(Notice::new(
            "Account has been created. Please verify your account to be able to sign in",
        ))
    }

    /// Promotes a staged account to a verified user.
    ///
    /// Not idempotent: once the staged entry is promoted (or has aged out),
    /// the same link reports `NoPendingAccount` — an already-verified
    /// account and an expired signup are indistinguishable here on purpose.
    pub async fn verify_account(&self, token: &str) -> AppResult<Notice> {
        let claims = self.codec.verify(token, TokenKind::Verification)?;

        let pending = self
            .pending
            .get(&claims.username)
            .await?
            .ok_or_else(|| {
                AppError::no_pending_account("Could not find an account to verify")
            })?;

        let user = self.repo.create(&pending).await?;
        self.pending.delete(&claims.username).await?;

        // Downstream indexing must never delay or fail the response.
        let indexer = Arc::clone(&self.indexer);
        let username = user.username.clone();
        tokio::spawn(async move {
            if let Err(e) = indexer.index_profile(&username).await {
                warn!(username = %username, error = %e, "Profile indexing failed");
            }
        });

        info!(username = %user.username, "Account verified");
        Ok(Notice::new("Account has been verified."))
    }

    /// Resolves a user from a sign-in identifier and plaintext credential.
    pub async fn validate_user(&self, username_or_email: &str, password: &str) -> AppResult<User> {
        let user = self
            .repo
            .find_by_username_or_email(username_or_email, username_or_email)
            .await?
            .ok_or_else(|| AppError::account_not_found("Account does not exist"))?;

        if !self.hasher.verify(password, &user.password_hash)? {
            return Err(AppError::validation("Password is incorrect"));
        }

        Ok(user)
    }

    /// Issues tokens for an already-validated user.
    ///
    /// Banned and inactive accounts are rejected before any token work. A
    /// refresh token is minted and rotated only when `remember_me` is set;
    /// a plain sign-in leaves any existing refresh session untouched.
    pub async fn sign_in(&self, user: User, remember_me: bool) -> AppResult<SignInOutcome> {
        if user.is_banned {
            return Err(AppError::banned("This is a banned account"));
        }
        if !user.is_active {
            return Err(AppError::inactive("Account is not active"));
        }

        let access_token = self.codec.issue_access(&user)?;
        let refresh_token = if remember_me {
            Some(self.accounts.rotate_refresh_token(&user).await?)
        } else {
            None
        };

        info!(username = %user.username, remember_me, "Signed in");
        Ok(SignInOutcome {
            access_token,
            refresh_token,
            user,
        })
    }

    /// Revokes a bearer token for the rest of its lifetime.
    ///
    /// The bearer was already authenticated upstream, so the token is
    /// decoded without re-verification; the subject's stored refresh token
    /// is cleared and the access token is denylisted until its own expiry.
    pub async fn sign_out(&self, bearer: &str) -> AppResult<Notice> {
        let token = bearer.strip_prefix("Bearer ").unwrap_or(bearer);
        let claims = self.codec.decode_unverified(token)?;

        self.accounts
            .invalidate_refresh_token(&claims.username)
            .await?;

        let remaining = claims.remaining_seconds(self.clock.now_timestamp());
        self.denylist.add(token, remaining).await?;

        info!(username = %claims.username, "Signed out");
        Ok(Notice::new("Token is killed"))
    }

    /// Mints a fresh access token from a live refresh token.
    ///
    /// Signature validity alone is not enough: a rotated-out refresh token
    /// still carries a valid signature, so the presented string must also
    /// match the one persisted on the user. The refresh token itself is not
    /// rotated here.
    pub async fn refresh_token(&self, refresh_token: &str) -> AppResult<String> {
        let claims = self.codec.verify(refresh_token, TokenKind::Refresh)?;
        let user = self
            .accounts
            .validate_refresh_token(&claims.username, refresh_token)
            .await?;

        self.codec.issue_access(&user)
    }

    /// Whether a bearer token has been signed out and is still inside its
    /// original lifetime.
    pub async fn is_session_denied(&self, token: &str) -> AppResult<bool> {
        self.denylist.contains(token).await
    }

    /// Persists a recovery key and mails it to the account's address.
    ///
    /// The key is not rolled back on delivery failure: an undelivered key
    /// is still single-use and is overwritten by the next request.
    pub async fn generate_recovery_key(&self, email: &str) -> AppResult<Notice> {
        let (user, key) = self.accounts.generate_recovery_key(email).await?;

        let recovery_url = format!(
            "{}/auth/sign-in/account-recover?email={email}&recoveryKey={key}",
            self.base_url
        );
        self.mail
            .send(&MailBody {
                receiver_email: email.to_string(),
                receiver_name: user.full_name.clone(),
                subject: format!("Account Recovery [{}]", user.username),
                text: recovery_url,
            })
            .await?;

        info!(username = %user.username, "Recovery key generated and mailed");
        Ok(Notice::new("Recovery key has been sent to email address"))
    }

    /// Resets the credential of the account holding a valid recovery key.
    pub async fn recover_account(
        &self,
        email: &str,
        recovery_key: &str,
        new_password: &str,
    ) -> AppResult<Notice> {
        self.repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::account_not_found("Account does not exist"))?;

        let new_hash = self.hasher.hash(new_password)?;
        self.accounts
            .consume_recovery_key(email, recovery_key, &new_hash)
            .await?;

        info!(email = %email, "Account recovered");
        Ok(Notice::new("Password has been successfully updated"))
    }

    /// Re-enables a deactivated account from an activation link.
    pub async fn activate_account(&self, token: &str) -> AppResult<Notice> {
        let claims = self.codec.verify(token, TokenKind::Activation)?;
        let user = self.repo.set_active(&claims.username, true).await?;

        info!(username = %user.username, "Account activated");
        Ok(Notice::new("Account has been activated."))
    }

    /// Mails an activation link to a deactivated account.
    pub async fn send_activation_mail(&self, email: &str) -> AppResult<Notice> {
        let user = self
            .repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::account_not_found("Account does not exist"))?;

        if user.is_active {
            return Err(AppError::validation("This account is already active."));
        }

        let token = self
            .codec
            .issue(TokenKind::Activation, &user.username, &user.email, None)?;
        let activation_url = format!("{}/auth/activate-account?token={token}", self.base_url);

        self.mail
            .send(&MailBody {
                receiver_email: user.email.clone(),
                receiver_name: user.full_name.clone(),
                subject: format!("RE-Enable Your Account [{}]", user.username),
                text: activation_url,
            })
            .await?;

        info!(username = %user.username, "Activation mail sent");
        Ok(Notice::new("Activation mail has been sent"))
    }

    /// Deactivates an account. The user can re-enable it later via the
    /// activation mail flow.
    pub async fn disable_account(&self, username: &str) -> AppResult<Notice> {
        let user = self.repo.set_active(username, false).await?;

        info!(username = %user.username, "Account disabled");
        Ok(Notice::new("Account has been disabled"))
    }
}
