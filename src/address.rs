// src/address.rs

//! Human-readable service URLs for log output.

use crate::options::ServeOptions;

/// Which of the two listeners an address refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Primary,
    Ui,
}

/// Format the externally visible address of the server or its UI.
///
/// Pure function: `<scheme>://<host>:<port>` plus a trailing-slashed base
/// URL when one is configured.
pub fn service_address(opts: &ServeOptions, role: Role) -> String {
    let scheme = if opts.https { "https" } else { "http" };
    let port = match role {
        Role::Primary => opts.port,
        Role::Ui => opts.ui_port,
    };
    let base = opts
        .baseurl
        .as_deref()
        .filter(|b| !b.is_empty())
        .map(|b| format!("{b}/"))
        .unwrap_or_default();

    format!("{scheme}://{}:{port}{base}", opts.host)
}
