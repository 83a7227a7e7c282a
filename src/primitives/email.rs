// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Mailbox syntax for SOA admin fields and DMARC report addresses.

use crate::constants::MAX_HOSTNAME_LENGTH;

const MAX_LOCAL_PART_LENGTH: usize = 64;

/// Returns true if `address` is a plausible `local@domain` mailbox.
///
/// The local part accepts the RFC 5322 dot-atom characters. The domain needs at least
/// two labels of letters, digits and inner hyphens.
#[must_use]
pub fn is_valid_email(address: &str) -> bool {
    let Some((local, domain)) = address.rsplit_once('@') else {
        return false;
    };
    is_valid_local_part(local) && is_valid_mail_domain(domain)
}

fn is_valid_local_part(local: &str) -> bool {
    if local.is_empty() || local.len() > MAX_LOCAL_PART_LENGTH {
        return false;
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }
    local
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b"!#$%&'*+-/=?^_`{|}~.".contains(&b))
}

fn is_valid_mail_domain(domain: &str) -> bool {
    if domain.is_empty() || domain.len() > MAX_HOSTNAME_LENGTH {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2
        && labels.iter().all(|label| {
            !label.is_empty()
                && label.len() <= 63
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
        })
}

#[cfg(test)]
#[path = "email_tests.rs"]
mod email_tests;
