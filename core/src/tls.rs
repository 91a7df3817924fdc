//! TLS configuration and trusted-root resolution.
//!
//! # Design
//! Server certificate verification is unconditional: this module never
//! builds a configuration with verification off and exposes no toggle to
//! request one. Mobile targets need an explicit root bundle — Android ships
//! one at a fixed system path, iOS apps bundle their own and export its
//! location — while desktop and server targets rely on the TLS provider's
//! own root store.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use ureq::tls::{parse_pem, Certificate, PemItem, RootCerts, TlsConfig};

use crate::error::FetchError;

/// TLS configuration for one https exchange.
pub fn client_config() -> Result<TlsConfig, FetchError> {
    let builder = TlsConfig::builder();
    let config = match bundle_path() {
        Some(path) => builder.root_certs(load_roots(&path)?).build(),
        None => builder.build(),
    };
    Ok(config)
}

/// Trusted-root bundle location for platforms that require an explicit one.
fn bundle_path() -> Option<PathBuf> {
    #[cfg(target_os = "android")]
    return Some(PathBuf::from("/system/etc/security/cacerts"));

    // No stable system path exists inside the iOS app sandbox; the host app
    // exports the location of the roots it bundles.
    #[cfg(target_os = "ios")]
    return std::env::var_os("SSL_CERT_FILE").map(PathBuf::from);

    #[cfg(not(any(target_os = "android", target_os = "ios")))]
    None
}

/// Load every PEM certificate at `path`, which may be a single bundle file
/// or a directory of them.
fn load_roots(path: &Path) -> Result<RootCerts, FetchError> {
    let mut certs = Vec::new();
    if path.is_dir() {
        let entries = fs::read_dir(path).map_err(|e| root_error(path, &e.to_string()))?;
        for entry in entries {
            let entry = entry.map_err(|e| root_error(path, &e.to_string()))?;
            append_pem(&entry.path(), &mut certs)?;
        }
    } else {
        append_pem(path, &mut certs)?;
    }

    if certs.is_empty() {
        return Err(root_error(path, "no certificates found"));
    }
    debug!("loaded {} trusted roots from {}", certs.len(), path.display());
    Ok(RootCerts::new_with_certs(&certs))
}

fn append_pem(path: &Path, certs: &mut Vec<Certificate<'static>>) -> Result<(), FetchError> {
    let pem = fs::read(path).map_err(|e| root_error(path, &e.to_string()))?;
    for item in parse_pem(&pem) {
        let item = item.map_err(|e| root_error(path, &e.to_string()))?;
        if let PemItem::Certificate(cert) = item {
            certs.push(cert.to_owned());
        }
    }
    Ok(())
}

fn root_error(path: &Path, detail: &str) -> FetchError {
    FetchError::Transport(format!("trusted roots at {}: {detail}", path.display()))
}
