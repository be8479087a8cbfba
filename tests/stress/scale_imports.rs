//! Scale test: large import sets, each import carrying its own activation.

use std::collections::HashSet;

use import_trust::error::ImportError;
use import_trust::token::TokenFetcher;
use import_trust::{
    decode_activation, AccountClaims, AccountKeyPair, ActivationBuilder, Import, ImportType,
    TokenResolver, ValidationResults,
};
use url::Url;

struct Offline;

impl TokenFetcher for Offline {
    fn fetch(&self, _url: &Url) -> import_trust::Result<String> {
        Err(ImportError::FetchFailed("offline".into()))
    }
}

#[test]
fn scale_1000_activations_unique_ids() {
    let exporter = AccountKeyPair::generate();
    let importer = AccountKeyPair::generate();
    let mut ids = HashSet::new();

    for i in 0..1000 {
        let token = ActivationBuilder::new(importer.account_id())
            .subject(format!("feed.{i}"))
            .import_type(ImportType::Stream)
            .sign(&exporter)
            .expect("signing should succeed");
        let claims = decode_activation(&token).expect("decoding should succeed");
        assert!(ids.insert(claims.id), "duplicate activation id at {i}");
    }
    assert_eq!(ids.len(), 1000);
}

#[test]
fn scale_500_imports_clean_account() {
    let importer = AccountKeyPair::generate();
    let exporters: Vec<AccountKeyPair> = (0..5).map(|_| AccountKeyPair::generate()).collect();
    let mut account = AccountClaims::new(importer.account_id());

    for i in 0..500 {
        let exporter = &exporters[i % exporters.len()];
        let (import, grant) = if i % 2 == 0 {
            let subject = format!("events.{i}.>");
            (Import::stream(subject.as_str(), exporter.account_id()), subject)
        } else {
            let import = Import::service(format!("rpc.{i}"), exporter.account_id())
                .with_to(format!("local.rpc.{i}"));
            (import, format!("rpc.{i}"))
        };
        let token = ActivationBuilder::new(importer.account_id())
            .subject(grant)
            .import_type(import.kind)
            .sign(exporter)
            .expect("signing should succeed");
        account.imports.add(import.with_token(token));
    }

    account.imports.sort();
    let mut vr = ValidationResults::new();
    account.validate_with(&TokenResolver::new(Offline), &mut vr);
    assert!(vr.is_empty(), "unexpected issues:\n{vr}");
}

#[test]
fn scale_many_mount_collisions() {
    let exporter = AccountKeyPair::generate();
    let mut account = AccountClaims::new(AccountKeyPair::generate().account_id());
    for i in 0..300 {
        account
            .imports
            .add(Import::service(format!("rpc.{i}"), exporter.account_id()).with_to("shared"));
    }

    let mut vr = ValidationResults::new();
    account.validate_with(&TokenResolver::new(Offline), &mut vr);
    assert_eq!(vr.len(), 299);
    assert!(vr.is_blocking(false));
}
