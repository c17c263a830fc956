//! feedgrid - A terminal viewer for an Instagram-style media feed
#![allow(clippy::uninlined_format_args)]

use std::fs::OpenOptions;
use std::io::{self, BufRead, Write};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tokio::runtime::Runtime;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use feedgrid::api::GraphClient;
use feedgrid::auth::{AuthClient, LoginForm, SignupForm};
use feedgrid::feed;
use feedgrid::{Config, paths};

fn main() -> Result<()> {
    // Parse CLI arguments
    let command = parse_args()?;

    // Initialize logging (RUST_LOG=debug for verbose output)
    init_tracing(matches!(command, Command::Run));

    match command {
        Command::Run => run_tui(),
        Command::Feed { query, concurrency } => feed_cli(query.as_deref(), concurrency),
        Command::Login { email } => login_cli(email),
        Command::Signup { username, email } => signup_cli(username, email),
        Command::Logout => logout_cli(),
        Command::Config => show_config(),
        Command::Help => {
            print_help();
            Ok(())
        }
        Command::Version => {
            print_version();
            Ok(())
        }
    }
}

/// TUI logs go to a file so they do not draw over the screen
fn init_tracing(tui: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);

    if !tui {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
        return;
    }

    let log_file = paths::log_path()
        .ok()
        .and_then(|path| OpenOptions::new().create(true).append(true).open(path).ok());

    match log_file {
        Some(file) => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init(),
        None => registry.init(),
    }
}

/// CLI commands
enum Command {
    Run,
    Feed {
        query: Option<String>,
        concurrency: Option<usize>,
    },
    Login {
        email: String,
    },
    Signup {
        username: String,
        email: String,
    },
    Logout,
    Config,
    Help,
    Version,
}

fn parse_args() -> Result<Command> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() == 1 {
        return Ok(Command::Run);
    }

    match args[1].as_str() {
        "-h" | "--help" | "help" => Ok(Command::Help),
        "-v" | "--version" | "version" => Ok(Command::Version),

        "feed" => {
            let flag_value = |short: &str, long: &str| {
                args.iter()
                    .position(|a| a == short || a == long)
                    .and_then(|i| args.get(i + 1))
                    .cloned()
            };

            let query = flag_value("-q", "--query");
            let concurrency = flag_value("-c", "--concurrency")
                .map(|v| {
                    v.parse::<usize>()
                        .map_err(|_| anyhow::anyhow!("Invalid concurrency: {v}"))
                })
                .transpose()?;
            Ok(Command::Feed { query, concurrency })
        }

        "login" => {
            let email = args
                .get(2)
                .ok_or_else(|| anyhow::anyhow!("Missing email\nExample: feedgrid login you@example.com"))?
                .clone();
            Ok(Command::Login { email })
        }

        "signup" => {
            let username = args
                .get(2)
                .ok_or_else(|| anyhow::anyhow!("Missing username"))?
                .clone();
            let email = args
                .get(3)
                .ok_or_else(|| anyhow::anyhow!("Missing email"))?
                .clone();
            Ok(Command::Signup { username, email })
        }

        "logout" => Ok(Command::Logout),
        "config" => Ok(Command::Config),

        other => Err(anyhow::anyhow!(
            "Unknown command: {other}\nRun 'feedgrid --help' for usage"
        )),
    }
}

fn print_help() {
    let config_path = Config::default_path()
        .map_or_else(|_| "Unknown".to_string(), |p| p.display().to_string());

    println!(
        r#"{}
▦ feedgrid - A terminal viewer for your media feed

USAGE:
    feedgrid                           Launch TUI
    feedgrid [COMMAND]

COMMANDS:
    feed [OPTIONS]                     Load the feed and print it
      Options:
        -q, --query <text>             Only posts whose caption contains <text>
        -c, --concurrency <n>          Detail requests in flight (default: 1)

    login <email>                      Log in (password read from stdin)
    signup <username> <email>          Create an account (password read from stdin)
    logout                             End the session
    config                             Show the resolved configuration

OPTIONS:
    -h, --help                         Show this help message
    -v, --version                      Show version information

KEYBINDINGS (TUI):
    ←↑↓→ / hjkl   Move between posts
    Enter         Open post
    Esc           Close post / clear search
    /             Search captions
    s             Share post
    o             Open in browser
    r             Reload
    t             Change theme
    L             Log out
    ?             Help

ENVIRONMENT:
    FEEDGRID_ACCOUNT_ID, FEEDGRID_ACCESS_TOKEN, FEEDGRID_AUTH_URL
    RUST_LOG                           Log filter (default: warn)

CONFIG:
    {}
"#,
        feedgrid::LOGO,
        config_path
    );
}

fn print_version() {
    println!("feedgrid {}", feedgrid::VERSION);
}

fn run_tui() -> Result<()> {
    feedgrid::app::run()
}

fn feed_cli(query: Option<&str>, concurrency: Option<usize>) -> Result<()> {
    let config = Config::load()?;
    let credentials = config.feed_credentials()?;
    let mut settings = config.fetch_settings();
    if let Some(k) = concurrency {
        settings.concurrency = k.max(1);
    }

    let client = GraphClient::new(&settings.base_url, &credentials.access_token, settings.timeout);
    let items = Runtime::new()?
        .block_on(feed::load_feed(&client, &credentials, settings.concurrency))
        .context("Failed to load feed")?;

    let shown = feed::filter(&items, query.unwrap_or(""));

    println!("▦ {} of {} posts", shown.len(), items.len());
    println!("{}", "─".repeat(60));

    for item in shown {
        println!("\n{}", item.title());
        for line in item.card_preview().lines() {
            println!("  {line}");
        }
        println!("  🔗 {}", item.permalink);
    }

    Ok(())
}

fn auth_client(config: &Config) -> Result<AuthClient> {
    let url = config.auth_url().ok_or_else(|| {
        anyhow::anyhow!("auth_url is not configured\nSet it in the config file or FEEDGRID_AUTH_URL")
    })?;
    Ok(AuthClient::new(url, config.request_timeout()))
}

fn read_password() -> Result<String> {
    print!("Password: ");
    io::stdout().flush()?;

    let mut password = String::new();
    io::stdin()
        .lock()
        .read_line(&mut password)
        .context("Failed to read password")?;
    Ok(password.trim_end_matches(['\r', '\n']).to_string())
}

fn login_cli(email: String) -> Result<()> {
    let config = Config::load()?;
    let client = auth_client(&config)?;
    let form = LoginForm {
        email,
        password: read_password()?,
    };

    let message = Runtime::new()?.block_on(client.login(&form))?;
    println!("✓ {message}");
    Ok(())
}

fn signup_cli(username: String, email: String) -> Result<()> {
    let config = Config::load()?;
    let client = auth_client(&config)?;

    let password = read_password()?;
    print!("Accept the terms and conditions? [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;

    let form = SignupForm {
        username,
        email,
        password,
        terms: answer.trim().eq_ignore_ascii_case("y"),
    };

    let message = Runtime::new()?.block_on(client.signup(&form))?;
    println!("✓ {message}");
    Ok(())
}

fn logout_cli() -> Result<()> {
    let config = Config::load()?;
    let client = auth_client(&config)?;

    let message = Runtime::new()?.block_on(client.logout())?;
    println!("✓ {message}");
    Ok(())
}

fn show_config() -> Result<()> {
    let config = Config::load()?;
    let path = Config::default_path()?;
    let set = |value: Option<&String>| {
        if value.is_some_and(|v| !v.trim().is_empty()) {
            "set"
        } else {
            "missing"
        }
    };

    println!("Config file:        {}", path.display());
    println!("Log file:           {}", paths::log_path()?.display());
    println!();
    println!("account_id:         {}", set(config.account_id.as_ref()));
    println!("access_token:       {}", set(config.access_token.as_ref()));
    println!("graph_base_url:     {}", config.graph_base_url);
    println!(
        "auth_url:           {}",
        config.auth_url().unwrap_or("(not configured)")
    );
    println!("detail_concurrency: {}", config.detail_concurrency);
    println!("request_timeout:    {}s", config.request_timeout_secs);
    println!("share_enabled:      {}", config.share_enabled);
    println!("show_images:        {}", config.show_images);
    println!("theme:              {}", config.theme);

    Ok(())
}
