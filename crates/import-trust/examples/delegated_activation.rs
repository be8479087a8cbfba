//! Delegated activation — an exporter's signing key grants an import,
//! the importer declares it, and the account is validated.
//!
//! Run with:
//!   cargo run --example delegated_activation -p import-trust

use import_trust::{
    decode_activation, AccountClaims, AccountKeyPair, ActivationBuilder, Import, ImportType,
    ValidationResults,
};

fn main() {
    // ── 1. Accounts ─────────────────────────────────────────────────────────
    //
    // The exporter keeps its account key offline and signs activations
    // with a separate signing key acting for it.
    let exporter = AccountKeyPair::generate();
    let signer = AccountKeyPair::generate();
    let importer = AccountKeyPair::generate();

    println!("Exporter: {}", exporter.account_id());
    println!("Signer:   {}", signer.account_id());
    println!("Importer: {}", importer.account_id());
    println!();

    // ── 2. Grant a service ──────────────────────────────────────────────────
    let token = match ActivationBuilder::new(importer.account_id())
        .subject("billing.*")
        .import_type(ImportType::Service)
        .issuer_account(exporter.account_id())
        .expires_in(24 * 3600)
        .name("billing access")
        .sign(&signer)
    {
        Ok(token) => token,
        Err(e) => {
            eprintln!("signing failed: {e}");
            return;
        }
    };
    println!("Activation token ({} bytes)", token.len());

    if let Ok(claims) = decode_activation(&token) {
        println!("  Grants:     {} \"{}\"", claims.import_type, claims.import_subject);
        println!("  Exporter:   {}", claims.exporting_account());
        println!("  Delegated:  {}", claims.is_delegated());
    }
    println!();

    // ── 3. Declare and validate imports ─────────────────────────────────────
    //
    // The second import reuses the first one's local subject, which is
    // not allowed for services.
    let mut account = AccountClaims::new(importer.account_id());
    account.imports.add(
        Import::service("billing.quote", exporter.account_id())
            .with_to("quote")
            .with_token(token.clone()),
    );
    account.imports.add(
        Import::service("billing.invoice", exporter.account_id())
            .with_to("quote")
            .with_token(token),
    );

    let mut vr = ValidationResults::new();
    account.validate(&mut vr);

    if vr.is_empty() {
        println!("All imports valid");
    } else {
        print!("{vr}");
        println!("Blocking: {}", vr.is_blocking(false));
    }
}
