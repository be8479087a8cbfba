//! import-trust CLI — `itrust` command.
//!
//! Generates account keys, signs and inspects activation tokens, and
//! validates the imports declared by an account.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};

use import_trust::storage::{load_account_key, read_account_id, save_account_key};
use import_trust::time::{now_secs, secs_to_rfc3339};
use import_trust::{
    decode_activation, subject_covers, AccountClaims, AccountId, AccountKeyPair,
    ActivationBuilder, HttpFetcher, ImportType, Resolution, TokenResolver, ValidationResults,
};

/// Environment variable consulted before prompting for a passphrase.
const PASSPHRASE_ENV: &str = "ITRUST_PASSPHRASE";

// ── Passphrase helper ─────────────────────────────────────────────────────────

fn read_passphrase(prompt: &str) -> Result<String> {
    if let Ok(passphrase) = std::env::var(PASSPHRASE_ENV) {
        return Ok(passphrase);
    }
    eprint!("{prompt}");
    std::io::stderr().flush().ok();
    let mut passphrase = String::new();
    std::io::stdin()
        .read_line(&mut passphrase)
        .context("failed to read passphrase")?;
    Ok(passphrase.trim().to_string())
}

// ── Duration helper ───────────────────────────────────────────────────────────

/// Parse a duration string like "24h", "7d", "1h30m", or bare hours.
/// Returns the duration in seconds; it must be positive.
fn parse_duration_secs(s: &str) -> Result<i64> {
    let s = s.trim();
    let overflow = || anyhow!("duration '{s}' is too large");

    let total = if let Ok(n) = s.parse::<i64>() {
        n.checked_mul(3_600).ok_or_else(overflow)?
    } else {
        let mut total: i64 = 0;
        let mut current = String::new();
        for ch in s.chars() {
            if ch.is_ascii_digit() {
                current.push(ch);
                continue;
            }
            let val: i64 = current
                .parse()
                .map_err(|_| anyhow!("invalid duration: {s}"))?;
            current.clear();
            let unit = match ch {
                'd' => 86_400,
                'h' => 3_600,
                'm' => 60,
                's' => 1,
                _ => bail!("unknown duration unit '{ch}' in '{s}'"),
            };
            total = val
                .checked_mul(unit)
                .and_then(|secs| total.checked_add(secs))
                .ok_or_else(overflow)?;
        }
        if !current.is_empty() {
            bail!("duration '{s}' is missing a unit (d/h/m/s)");
        }
        total
    };

    if total <= 0 {
        bail!("duration must be > 0");
    }
    Ok(total)
}

// ── CLI structure ─────────────────────────────────────────────────────────────

/// import-trust CLI — account keys, activation tokens and import validation.
#[derive(Parser, Debug)]
#[command(
    name = "itrust",
    about = "import-trust CLI",
    version,
    long_about = "itrust — import-trust CLI\n\nGenerate account keys, sign and inspect activation tokens,\nand validate the imports an account declares."
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a new account key
    Keygen {
        /// Where to write the encrypted key file
        #[arg(long)]
        out: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the account identity stored in a key file
    Show {
        /// Key file
        key: PathBuf,
    },

    /// Sign an activation token granting an import
    Activate {
        /// Key file of the exporting account (or its delegated signing key)
        #[arg(long)]
        key: PathBuf,

        /// Account allowed to import
        #[arg(long)]
        recipient: String,

        /// Granted subject pattern (e.g. orders.>)
        #[arg(long)]
        subject: String,

        /// Granted import type: stream or service
        #[arg(long = "type")]
        import_type: String,

        /// Lifetime such as 24h, 7d, 1h30m
        #[arg(long)]
        expires: Option<String>,

        /// Account the signing key acts for, when it is a delegated key
        #[arg(long)]
        issuer_account: Option<String>,

        /// Optional label
        #[arg(long)]
        name: Option<String>,
    },

    /// Decode an activation token given inline or as a URL
    Inspect {
        /// Token text or http(s) URL
        token: String,

        /// Fetch timeout in milliseconds
        #[arg(long, default_value_t = 5000)]
        timeout_ms: u64,
    },

    /// Validate the imports of an account claims JSON file
    Validate {
        /// Account claims file: {"account": ..., "imports": [...]}
        file: PathBuf,

        /// Fetch timeout in milliseconds for URL tokens
        #[arg(long, default_value_t = 5000)]
        timeout_ms: u64,

        /// Strict blocking check
        #[arg(long)]
        strict: bool,

        /// Print imports in canonical order before validating
        #[arg(long)]
        sorted: bool,

        /// Emit issues as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check whether a granted subject pattern covers a requested one
    Covers {
        grant: String,
        requested: String,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let verbose = cli.verbose;

    let result = match cli.command {
        Commands::Keygen { out, force } => cmd_keygen(&out, force, verbose),
        Commands::Show { key } => cmd_show(&key),
        Commands::Activate {
            key,
            recipient,
            subject,
            import_type,
            expires,
            issuer_account,
            name,
        } => cmd_activate(
            &key,
            &recipient,
            &subject,
            &import_type,
            expires.as_deref(),
            issuer_account.as_deref(),
            name,
        ),
        Commands::Inspect { token, timeout_ms } => cmd_inspect(&token, timeout_ms),
        Commands::Validate {
            file,
            timeout_ms,
            strict,
            sorted,
            json,
        } => cmd_validate(&file, timeout_ms, strict, sorted, json, verbose),
        Commands::Covers { grant, requested } => {
            println!("{}", subject_covers(&grant, &requested));
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn cmd_keygen(out: &Path, force: bool, verbose: bool) -> Result<()> {
    if out.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", out.display());
    }

    let passphrase = read_passphrase("Enter passphrase for new key: ")?;
    if passphrase.is_empty() {
        bail!("passphrase cannot be empty");
    }

    let key = AccountKeyPair::generate();
    save_account_key(&key, out, &passphrase).context("failed to save key")?;
    log::info!("generated account {} at {}", key.account_id(), out.display());

    println!("{}", key.account_id());
    if verbose {
        eprintln!("  File: {}", out.display());
    }
    Ok(())
}

fn cmd_show(path: &Path) -> Result<()> {
    let account = read_account_id(path)
        .with_context(|| format!("failed to read key file {}", path.display()))?;
    println!("{account}");
    Ok(())
}

fn cmd_activate(
    key_path: &Path,
    recipient: &str,
    subject: &str,
    import_type: &str,
    expires: Option<&str>,
    issuer_account: Option<&str>,
    name: Option<String>,
) -> Result<()> {
    let recipient = AccountId::parse(recipient).context("invalid --recipient")?;
    let kind = ImportType::from_name(import_type);
    if kind == ImportType::Unknown {
        bail!("--type must be stream or service, got '{import_type}'");
    }

    let passphrase = read_passphrase("Enter key passphrase: ")?;
    let key = load_account_key(key_path, &passphrase)
        .with_context(|| format!("failed to load key {}", key_path.display()))?;

    let mut builder = ActivationBuilder::new(recipient)
        .subject(subject)
        .import_type(kind);
    if let Some(expires) = expires {
        builder = builder.expires_in(parse_duration_secs(expires)?);
    }
    if let Some(account) = issuer_account {
        builder =
            builder.issuer_account(AccountId::parse(account).context("invalid --issuer-account")?);
    }
    if let Some(name) = name {
        builder = builder.name(name);
    }

    let token = builder.sign(&key).context("failed to sign activation")?;
    log::debug!("signed activation as {}", key.account_id());
    println!("{token}");
    Ok(())
}

fn cmd_inspect(token: &str, timeout_ms: u64) -> Result<()> {
    let resolver = TokenResolver::new(HttpFetcher::with_timeout(Duration::from_millis(
        timeout_ms,
    )));
    let text = match resolver.resolve(token) {
        Resolution::NoToken => bail!("no token given"),
        Resolution::Failed(reason) => bail!("could not resolve token: {reason}"),
        Resolution::Resolved(text) => text,
    };
    let claims = decode_activation(&text).context("invalid activation token")?;

    println!(
        "{}",
        serde_json::to_string_pretty(&claims).context("failed to render claims")?
    );
    eprintln!("Exporting account: {}", claims.exporting_account());
    if claims.is_delegated() {
        eprintln!("Signed by delegated key: {}", claims.issuer);
    }
    if let Some(exp) = claims.expires_at {
        let state = if claims.is_expired(now_secs()) {
            "expired"
        } else {
            "valid"
        };
        eprintln!("Expires: {} ({state})", secs_to_rfc3339(exp));
    }
    Ok(())
}

fn cmd_validate(
    path: &Path,
    timeout_ms: u64,
    strict: bool,
    sorted: bool,
    json: bool,
    verbose: bool,
) -> Result<()> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let mut account: AccountClaims =
        serde_json::from_str(&raw).context("invalid account claims JSON")?;
    if sorted {
        account.imports.sort();
    }

    if verbose {
        eprintln!("Account: {}", account.account);
        for import in &account.imports {
            eprintln!(
                "  {} {} from {} -> {}",
                import.kind,
                import.subject,
                import.account,
                import.local_subject()
            );
        }
    }

    let resolver = TokenResolver::new(HttpFetcher::with_timeout(Duration::from_millis(
        timeout_ms,
    )));
    let mut vr = ValidationResults::new();
    account.validate_with(&resolver, &mut vr);
    log::debug!(
        "validated {} import(s) for {}",
        account.imports.len(),
        account.account
    );

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(vr.issues()).context("failed to render issues")?
        );
    } else {
        print!("{vr}");
        println!(
            "{} import(s), {} issue(s), {} blocking",
            account.imports.len(),
            vr.len(),
            vr.blocking().count()
        );
    }

    if vr.is_blocking(strict) {
        bail!("account has blocking import issues");
    }
    Ok(())
}
