//! Async operations for the TUI
//!
//! Uses channels to communicate between the sync TUI loop and async tasks.

use std::time::Duration;

use image::DynamicImage;
use tokio::sync::mpsc;

use crate::api::GraphClient;
use crate::auth::{AuthClient, LoginForm, SignupForm};
use crate::config::FetchSettings;
use crate::feed::{FeedCredentials, FeedEvent, load_feed};
use crate::images;

/// Commands sent from the TUI to the async worker
#[derive(Debug, Clone)]
pub enum AsyncCommand {
    /// Load the feed; the result carries `generation` back
    LoadFeed {
        generation: u64,
        credentials: FeedCredentials,
        settings: FetchSettings,
    },
    /// Download a full-size image for the overlay
    LoadImage { url: String },
    /// Log in with the given form
    Login { form: LoginForm },
    /// Create an account
    Signup { form: SignupForm },
    /// End the session
    Logout,
    /// Shutdown the worker
    Shutdown,
}

/// Results sent back from the async worker to the TUI
#[derive(Debug)]
pub enum AsyncResult {
    /// A feed load finished
    Feed(FeedEvent),
    /// Image downloaded and decoded
    ImageLoaded { url: String, image: DynamicImage },
    /// Image download failed
    ImageFailed { url: String, error: String },
    /// Login accepted
    LoggedIn { message: String },
    /// Account created
    SignedUp { message: String },
    /// Session ended
    LoggedOut { message: String },
    /// Login, signup or logout failed
    AuthFailed { message: String },
}

/// Channel handles for communicating with the async worker
pub struct AsyncHandle {
    /// Send commands to the worker
    pub cmd_tx: mpsc::Sender<AsyncCommand>,
    /// Receive results from the worker
    pub result_rx: mpsc::Receiver<AsyncResult>,
}

/// Spawn the async worker and return handles.
///
/// The worker owns one `AuthClient` so the session cookie survives between
/// login and logout. Feed and image loads run as their own tasks.
pub fn spawn_worker(auth_url: Option<String>, timeout: Duration) -> AsyncHandle {
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<AsyncCommand>(32);
    let (result_tx, result_rx) = mpsc::channel::<AsyncResult>(32);

    tokio::spawn(async move {
        let auth = auth_url.map(|url| AuthClient::new(&url, timeout));
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        while let Some(cmd) = cmd_rx.recv().await {
            match cmd {
                AsyncCommand::Shutdown => break,
                AsyncCommand::LoadFeed {
                    generation,
                    credentials,
                    settings,
                } => {
                    let tx = result_tx.clone();
                    tokio::spawn(async move {
                        handle_load_feed(&tx, generation, credentials, settings).await;
                    });
                }
                AsyncCommand::LoadImage { url } => {
                    let tx = result_tx.clone();
                    let http = http.clone();
                    tokio::spawn(async move {
                        handle_load_image(&tx, &http, url).await;
                    });
                }
                AsyncCommand::Login { form } => {
                    handle_login(&result_tx, auth.as_ref(), form).await;
                }
                AsyncCommand::Signup { form } => {
                    handle_signup(&result_tx, auth.as_ref(), form).await;
                }
                AsyncCommand::Logout => {
                    handle_logout(&result_tx, auth.as_ref()).await;
                }
            }
        }
        tracing::debug!("Async worker stopped");
    });

    AsyncHandle { cmd_tx, result_rx }
}

async fn handle_load_feed(
    result_tx: &mpsc::Sender<AsyncResult>,
    generation: u64,
    credentials: FeedCredentials,
    settings: FetchSettings,
) {
    let client = GraphClient::new(&settings.base_url, &credentials.access_token, settings.timeout);

    let event = match load_feed(&client, &credentials, settings.concurrency).await {
        Ok(items) => {
            tracing::info!(generation, count = items.len(), "Feed loaded");
            FeedEvent::Loaded { generation, items }
        }
        Err(error) => {
            tracing::warn!(generation, "Feed load failed: {error}");
            FeedEvent::Failed { generation, error }
        }
    };

    let _ = result_tx.send(AsyncResult::Feed(event)).await;
}

async fn handle_load_image(result_tx: &mpsc::Sender<AsyncResult>, client: &reqwest::Client, url: String) {
    let result = match images::download_and_decode(client, &url).await {
        Ok(image) => AsyncResult::ImageLoaded { url, image },
        Err(e) => AsyncResult::ImageFailed {
            url,
            error: format!("{e:#}"),
        },
    };
    let _ = result_tx.send(result).await;
}

async fn handle_login(result_tx: &mpsc::Sender<AsyncResult>, auth: Option<&AuthClient>, form: LoginForm) {
    let Some(auth) = auth else {
        send_auth_unconfigured(result_tx).await;
        return;
    };

    let result = match auth.login(&form).await {
        Ok(message) => AsyncResult::LoggedIn { message },
        Err(e) => AsyncResult::AuthFailed {
            message: e.to_string(),
        },
    };
    let _ = result_tx.send(result).await;
}

async fn handle_signup(
    result_tx: &mpsc::Sender<AsyncResult>,
    auth: Option<&AuthClient>,
    form: SignupForm,
) {
    let Some(auth) = auth else {
        send_auth_unconfigured(result_tx).await;
        return;
    };

    let result = match auth.signup(&form).await {
        Ok(message) => AsyncResult::SignedUp { message },
        Err(e) => AsyncResult::AuthFailed {
            message: e.to_string(),
        },
    };
    let _ = result_tx.send(result).await;
}

async fn handle_logout(result_tx: &mpsc::Sender<AsyncResult>, auth: Option<&AuthClient>) {
    let Some(auth) = auth else {
        send_auth_unconfigured(result_tx).await;
        return;
    };

    let result = match auth.logout().await {
        Ok(message) => AsyncResult::LoggedOut { message },
        Err(e) => AsyncResult::AuthFailed {
            message: format!("Logout failed: {e}"),
        },
    };
    let _ = result_tx.send(result).await;
}

async fn send_auth_unconfigured(result_tx: &mpsc::Sender<AsyncResult>) {
    let _ = result_tx
        .send(AsyncResult::AuthFailed {
            message: "Authentication is not configured (set auth_url)".to_string(),
        })
        .await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_credentials_come_back_as_failed_event() {
        let mut handle = spawn_worker(None, Duration::from_secs(1));
        handle
            .cmd_tx
            .send(AsyncCommand::LoadFeed {
                generation: 7,
                credentials: FeedCredentials::new("", ""),
                settings: FetchSettings {
                    base_url: "http://127.0.0.1:9".into(),
                    timeout: Duration::from_secs(1),
                    concurrency: 1,
                },
            })
            .await
            .unwrap();

        match handle.result_rx.recv().await.unwrap() {
            AsyncResult::Feed(FeedEvent::Failed { generation, error }) => {
                assert_eq!(generation, 7);
                assert!(error.is_config());
            }
            other => panic!("unexpected result: {other:?}"),
        }

        let _ = handle.cmd_tx.send(AsyncCommand::Shutdown).await;
    }

    #[tokio::test]
    async fn test_login_without_auth_url_fails() {
        let mut handle = spawn_worker(None, Duration::from_secs(1));
        handle
            .cmd_tx
            .send(AsyncCommand::Login {
                form: LoginForm::default(),
            })
            .await
            .unwrap();

        assert!(matches!(
            handle.result_rx.recv().await,
            Some(AsyncResult::AuthFailed { .. })
        ));
    }
}
