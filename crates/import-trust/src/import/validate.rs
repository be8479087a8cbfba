//! Import validation — checking an import against its activation.
//!
//! Per-import checks, in order:
//! 1. Exporting account present (warning)
//! 2. Import type is stream or service (blocking)
//! 3. `share` only on services (blocking)
//! 4. Token resolves and decodes (warning; later checks need it)
//! 5. Activation names this account as recipient (blocking)
//! 6. Activation was issued for the import's exporting account (blocking)
//! 7. Activation grants the import's type and covers its subject (blocking)
//!
//! Expiry is decoded but not checked here. Whether a delegated signing
//! key is registered with `issuer_account` is for the exporting
//! account's own claims to decide.

use std::collections::HashSet;

use crate::account::AccountId;
use crate::activation::decode_activation;
use crate::subject::{subject_covers, Subject};
use crate::token::{Resolution, TokenResolver};
use crate::validation::ValidationResults;

use super::import::{Import, ImportType};
use super::imports::Imports;

/// Validate one import, recording issues in `vr`.
///
/// `recipient` is the identity of the account doing the importing. When
/// it is `None` or empty only checks 1–4 run.
pub fn validate_import(
    import: &Import,
    recipient: Option<&AccountId>,
    resolver: &TokenResolver,
    vr: &mut ValidationResults,
) {
    let subject = &import.subject;

    if import.account.is_empty() {
        vr.add_warning(format!(
            "import \"{subject}\": no exporting account specified"
        ));
    }

    if import.kind == ImportType::Unknown {
        vr.add_blocking(format!(
            "import \"{subject}\": invalid import type, expected stream or service"
        ));
    }

    if import.share && import.is_stream() {
        vr.add_blocking(format!(
            "import \"{subject}\": sharing requester information is only valid for services"
        ));
    }

    let token = match resolver.resolve(&import.token) {
        Resolution::NoToken => return,
        Resolution::Failed(reason) => {
            vr.add_warning(format!(
                "import \"{subject}\": activation token could not be resolved: {reason}"
            ));
            return;
        }
        Resolution::Resolved(token) => token,
    };

    let claims = match decode_activation(&token) {
        Ok(claims) => claims,
        Err(e) => {
            vr.add_warning(format!(
                "import \"{subject}\": activation token is not a valid credential: {e}"
            ));
            return;
        }
    };
    log::debug!(
        "import \"{subject}\": activation {} from {} decoded",
        claims.id,
        claims.issuer
    );

    let Some(recipient) = recipient.filter(|r| !r.is_empty()) else {
        return;
    };

    if claims.recipient != *recipient {
        vr.add_blocking(format!(
            "import \"{subject}\": activation was not issued to this account (issued to {})",
            claims.recipient
        ));
    }

    if *claims.exporting_account() != import.account {
        vr.add_blocking(format!(
            "import \"{subject}\": activation issuer {} does not match the declared exporting account",
            claims.exporting_account()
        ));
    }

    if claims.import_type != import.kind
        || !subject_covers(claims.import_subject.as_str(), subject.as_str())
    {
        vr.add_blocking(format!(
            "import \"{subject}\": activation grants {} \"{}\", which does not cover the requested {}",
            claims.import_type, claims.import_subject, import.kind
        ));
    }
}

/// Validate every import plus the set-wide mount invariant.
///
/// Two service imports may not occupy the same local subject; each
/// service import whose local subject was already taken adds one
/// blocking issue. Stream imports may overlap freely.
pub fn validate_imports(
    imports: &Imports,
    recipient: Option<&AccountId>,
    resolver: &TokenResolver,
    vr: &mut ValidationResults,
) {
    let mut mounts = HashSet::new();
    for import in imports {
        validate_import(import, recipient, resolver, vr);
        check_service_mount(import, &mut mounts, vr);
    }
}

/// Like [`validate_imports`], but imports are spread over a bounded pool
/// of threads, at most one per available core.
///
/// Per-import issues are merged in canonical (subject) order, followed
/// by mount collisions, so the output does not depend on scheduling.
pub fn validate_imports_concurrent(
    imports: &Imports,
    recipient: Option<&AccountId>,
    resolver: &TokenResolver,
    vr: &mut ValidationResults,
) {
    let slice = imports.as_slice();
    if slice.is_empty() {
        return;
    }
    let chunk_size = slice.len().div_ceil(worker_count(slice.len()));

    let mut per_import: Vec<(&Import, ValidationResults)> = std::thread::scope(|scope| {
        let handles: Vec<_> = slice
            .chunks(chunk_size)
            .map(|chunk| {
                scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|import| {
                            let mut local = ValidationResults::new();
                            validate_import(import, recipient, resolver, &mut local);
                            (import, local)
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
            .collect()
    });

    per_import.sort_by(|(a, _), (b, _)| a.subject.cmp(&b.subject));
    for (_, results) in per_import {
        vr.merge(results);
    }

    let mut mounts = HashSet::new();
    for import in imports {
        check_service_mount(import, &mut mounts, vr);
    }
}

/// Threads used for `len` imports: one per core, never more than `len`.
fn worker_count(len: usize) -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .min(len)
}

fn check_service_mount<'a>(
    import: &'a Import,
    mounts: &mut HashSet<&'a Subject>,
    vr: &mut ValidationResults,
) {
    if !import.is_service() {
        return;
    }
    let local = import.local_subject();
    if !mounts.insert(local) {
        vr.add_blocking(format!(
            "import \"{}\": local subject \"{local}\" is already used by another service import",
            import.subject
        ));
    }
}
