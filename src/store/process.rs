// envstore: Validated Environment Variable Store
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The process environment as an origin table.
//!
//! ```text
//! read()          std::env::vars_os()
//! read_fallback() /proc/self/environ (Linux), empty elsewhere
//! lookup          std::env::var_os(), kept raw
//! write/remove    std::env::set_var / remove_var, after rejecting input
//!                 those primitives would panic on
//! restore         also puts back non-UTF-8 values
//! ```

use std::ffi::OsString;
use std::io;

use super::origin::{OriginTable, RawScalar, RawTable};

/// The live OS environment of this process.
///
/// # Safety contract
///
/// `write` and `remove` modify the process environment. On most platforms
/// this is only sound while no other thread reads or writes the
/// environment concurrently, including through libc calls such as
/// `getenv`. Callers sharing a store across threads must serialize all
/// environment access, for example through [`SharedStore`](super::SharedStore)
/// and by not touching the environment elsewhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl ProcessEnv {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn check_key(name: &str) -> io::Result<()> {
        if name.is_empty() || name.contains('=') || name.contains('\0') {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{name:?} is not a valid environment variable name"),
            ));
        }
        Ok(())
    }
}

impl OriginTable for ProcessEnv {
    fn name(&self) -> &'static str {
        "process environment"
    }

    fn read(&self) -> io::Result<RawTable> {
        Ok(std::env::vars_os()
            .map(|(k, v)| (RawScalar::from(k), RawScalar::from(v)))
            .collect())
    }

    #[cfg(target_os = "linux")]
    fn read_fallback(&self) -> io::Result<RawTable> {
        match std::fs::read("/proc/self/environ") {
            Ok(bytes) => Ok(parse_environ_block(&bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    fn lookup(&self, name: &str) -> io::Result<Option<RawScalar>> {
        Self::check_key(name)?;
        Ok(std::env::var_os(name).map(RawScalar::from))
    }

    fn write(&self, name: &str, value: &str) -> io::Result<()> {
        Self::check_key(name)?;
        if value.contains('\0') {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("value for {name:?} contains a NUL byte"),
            ));
        }
        // SAFETY: see the safety contract on `ProcessEnv`.
        unsafe { std::env::set_var(name, value) };
        Ok(())
    }

    fn remove(&self, name: &str) -> io::Result<()> {
        Self::check_key(name)?;
        // SAFETY: see the safety contract on `ProcessEnv`.
        unsafe { std::env::remove_var(name) };
        Ok(())
    }

    fn restore(&self, name: &str, previous: Option<&RawScalar>) -> io::Result<()> {
        match previous {
            Some(RawScalar::Bytes(value)) => {
                Self::check_key(name)?;
                // SAFETY: see the safety contract on `ProcessEnv`.
                unsafe { std::env::set_var(name, value) };
                Ok(())
            }
            Some(RawScalar::Text(value)) => self.write(name, value),
            None => self.remove(name),
            Some(other) => Err(io::Error::new(
                io::ErrorKind::Unsupported,
                format!("the process environment cannot hold a {} value", other.kind()),
            )),
        }
    }
}

/// Parses a NUL-separated `KEY=value` block as found in `/proc/<pid>/environ`.
///
/// Entries without `=` are skipped. A leading `=` belongs to the key, which
/// matches how Windows-style `=C:` entries are stored.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
pub(crate) fn parse_environ_block(block: &[u8]) -> RawTable {
    block
        .split(|&b| b == 0)
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| {
            let eq = entry.iter().skip(1).position(|&b| b == b'=')? + 1;
            let key = bytes_to_os(&entry[..eq]);
            let value = bytes_to_os(&entry[eq + 1..]);
            Some((RawScalar::from(key), RawScalar::from(value)))
        })
        .collect()
}

#[cfg(unix)]
fn bytes_to_os(bytes: &[u8]) -> OsString {
    use std::os::unix::ffi::OsStrExt;
    std::ffi::OsStr::from_bytes(bytes).to_os_string()
}

#[cfg(not(unix))]
fn bytes_to_os(bytes: &[u8]) -> OsString {
    OsString::from(String::from_utf8_lossy(bytes).into_owned())
}
