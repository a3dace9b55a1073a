use axum_extra::extract::cookie::{Cookie, CookieJar};
use chrono::{DateTime, TimeDelta, Utc};
use std::collections::HashMap;
use tokio::sync::Mutex;

use crate::models::Flash;

pub const FLASH_COOKIE: &str = "flash";

/// Unclaimed messages older than this are dropped
const FLASH_TTL_MINUTES: i64 = 5;

struct Pending {
    created_at: DateTime<Utc>,
    messages: Vec<Flash>,
}

/// FlashStore keeps one-shot messages server-side between a redirect and the
/// next rendered page. The browser only holds an opaque id in the `flash` cookie.
pub struct FlashStore {
    pending: Mutex<HashMap<String, Pending>>,
}

impl FlashStore {
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(HashMap::new()),
        }
    }

    /// Queue messages for the next page this browser renders
    pub async fn push(&self, jar: CookieJar, messages: Vec<Flash>) -> CookieJar {
        if messages.is_empty() {
            return jar;
        }

        let mut pending = self.pending.lock().await;
        let cutoff = Utc::now() - TimeDelta::minutes(FLASH_TTL_MINUTES);
        pending.retain(|_, p| p.created_at > cutoff);

        let id = jar
            .get(FLASH_COOKIE)
            .map(|c| c.value().to_string())
            .filter(|id| pending.contains_key(id))
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        pending
            .entry(id.clone())
            .or_insert_with(|| Pending {
                created_at: Utc::now(),
                messages: Vec::new(),
            })
            .messages
            .extend(messages);

        let mut cookie = Cookie::new(FLASH_COOKIE, id);
        cookie.set_path("/");
        cookie.set_http_only(true);
        jar.add(cookie)
    }

    /// Claim and clear the messages queued for this browser
    pub async fn take(&self, jar: CookieJar) -> (CookieJar, Vec<Flash>) {
        let Some(id) = jar.get(FLASH_COOKIE).map(|c| c.value().to_string()) else {
            return (jar, Vec::new());
        };

        let messages = self
            .pending
            .lock()
            .await
            .remove(&id)
            .map(|p| p.messages)
            .unwrap_or_default();

        (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), messages)
    }
}

impl Default for FlashStore {
    fn default() -> Self {
        Self::new()
    }
}
