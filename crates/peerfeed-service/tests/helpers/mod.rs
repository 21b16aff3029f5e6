//! Shared harness for auth flow tests.
//!
//! Builds the full service over in-memory collaborators: a memory user
//! repository, a moka-backed TTL store, a recording mail gateway, and a
//! clock the tests can advance by hand.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

use peerfeed_auth::{
    AccountStore, PasswordHasher, PendingAccountStore, SessionDenylist, TokenCodec,
};
use peerfeed_cache::memory::MemoryCacheProvider;
use peerfeed_cache::CacheManager;
use peerfeed_core::config::cache::MemoryCacheConfig;
use peerfeed_core::config::AuthConfig;
use peerfeed_core::error::AppError;
use peerfeed_core::result::AppResult;
use peerfeed_core::traits::{Clock, MailBody, MailGateway, NoopProfileIndexer};
use peerfeed_database::repositories::{MemoryUserRepository, UserRepository};
use peerfeed_entity::User;
use peerfeed_service::{AuthService, SignUpRequest};

pub const BASE_URL: &str = "https://peerfeed.dev";

/// Clock the tests control.
#[derive(Debug)]
pub struct ManualClock(Mutex<DateTime<Utc>>);

impl ManualClock {
    pub fn starting_at(ts: i64) -> Arc<Self> {
        Arc::new(Self(Mutex::new(Utc.timestamp_opt(ts, 0).unwrap())))
    }

    pub fn advance_seconds(&self, secs: i64) {
        let mut now = self.0.lock().unwrap();
        *now += Duration::seconds(secs);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

/// Mail gateway that records deliveries and can be told to fail.
#[derive(Debug, Default)]
pub struct MockMailGateway {
    sent: Mutex<Vec<MailBody>>,
    fail: AtomicBool,
}

impl MockMailGateway {
    pub fn last_sent(&self) -> MailBody {
        self.sent.lock().unwrap().last().cloned().unwrap()
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl MailGateway for MockMailGateway {
    async fn send(&self, body: &MailBody) -> AppResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::mail_delivery("SMTP transport failed"));
        }
        self.sent.lock().unwrap().push(body.clone());
        Ok(())
    }
}

/// The service plus handles on its collaborators.
pub struct TestApp {
    pub service: AuthService,
    pub repo: Arc<MemoryUserRepository>,
    pub mail: Arc<MockMailGateway>,
    pub clock: Arc<ManualClock>,
}

impl TestApp {
    pub fn new() -> Self {
        let clock = ManualClock::starting_at(1_700_000_000);
        let config = AuthConfig {
            access_token_secret: "test-access-secret".to_string(),
            refresh_token_secret: "test-refresh-secret".to_string(),
            ..AuthConfig::default()
        };

        let repo = Arc::new(MemoryUserRepository::new());
        let codec = Arc::new(TokenCodec::new(&config, clock.clone()));
        let cache = Arc::new(CacheManager::from_provider(Arc::new(
            MemoryCacheProvider::new(&MemoryCacheConfig::default()),
        )));
        let mail = Arc::new(MockMailGateway::default());

        let repo_dyn: Arc<dyn UserRepository> = repo.clone();
        let service = AuthService::new(
            repo_dyn.clone(),
            codec.clone(),
            PendingAccountStore::new(cache.clone(), config.verification_ttl_seconds),
            SessionDenylist::new(cache),
            AccountStore::new(repo_dyn, codec),
            Arc::new(PasswordHasher::new()),
            mail.clone(),
            Arc::new(NoopProfileIndexer),
            clock.clone(),
            BASE_URL.to_string(),
        );

        Self {
            service,
            repo,
            mail,
            clock,
        }
    }

    pub fn sign_up_request(username: &str) -> SignUpRequest {
        SignUpRequest {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            full_name: format!("{username} Example"),
            password: "hunter2hunter2".to_string(),
        }
    }

    /// Pulls the token out of the URL in the most recent mail.
    pub fn token_from_last_mail(&self) -> String {
        let body = self.mail.last_sent();
        let (_, token) = body.text.split_once("token=").unwrap();
        token.to_string()
    }

    /// Runs the full signup + verification flow for a username.
    pub async fn create_verified_user(&self, username: &str) -> User {
        self.service
            .sign_up(Self::sign_up_request(username))
            .await
            .unwrap();
        let token = self.token_from_last_mail();
        self.service.verify_account(&token).await.unwrap();
        self.repo
            .find_by_username(username)
            .await
            .unwrap()
            .unwrap()
    }
}
