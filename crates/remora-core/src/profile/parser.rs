//! Parser for the `key=value` text of a Remmina profile.
//!
//! The format has no header, quoting or escaping. Lines may appear in any
//! order and keys may repeat; the last non-empty value wins. Anything that is
//! not one of the recognised keys is ignored, so parsing never fails on
//! content.

use super::ProfileFields;
use crate::{Error, Result};
use std::path::Path;

/// Protocol assumed for a profile that could not be read, so an icon can
/// still be chosen.
pub const DEFAULT_PROTOCOL: &str = "rdp";

const USERNAME_MARKER: &str = "username=";

/// Accumulates field values line by line.
#[derive(Default)]
struct FieldsBuilder {
    name: String,
    server: String,
    username: String,
    group: String,
    protocol: String,
}

impl FieldsBuilder {
    fn feed(&mut self, line: &str) {
        if let Some(value) = line.strip_prefix("name=")
            && !value.is_empty()
        {
            self.name = value.to_string();
        }

        // Matched anywhere in the line: ssh_username= and ssh_tunnel_username=
        // feed the same field, whichever comes last in the file.
        if let Some(pos) = line.find(USERNAME_MARKER) {
            let rest = &line[pos + USERNAME_MARKER.len()..];
            let value = rest.split(USERNAME_MARKER).next().unwrap_or_default();
            if !value.is_empty() {
                self.username = value.to_string();
            }
        }

        if let Some(value) = line.strip_prefix("server=")
            && !value.is_empty()
        {
            self.server = value.to_string();
        }

        if let Some(value) = line.strip_prefix("group=")
            && !value.is_empty()
        {
            self.group = value.to_string();
        }

        if let Some(value) = line.strip_prefix("protocol=")
            && !value.is_empty()
        {
            self.protocol = value.trim().to_lowercase();
        }
    }

    fn build(self) -> ProfileFields {
        let description = compose_description(
            &self.server,
            &self.username,
            &self.protocol,
            &self.group,
        );

        ProfileFields {
            title: self.name,
            server: self.server,
            username: self.username,
            group: self.group,
            protocol: self.protocol,
            description,
        }
    }
}

/// `[protocol://][username@]server [| group]`, always joined by one space.
fn compose_description(server: &str, username: &str, protocol: &str, group: &str) -> String {
    let mut target = server.to_string();
    if !username.is_empty() {
        target = format!("{username}@{target}");
    }
    if !protocol.is_empty() {
        target = format!("{protocol}://{target}");
    }

    let group_part = if group.is_empty() {
        String::new()
    } else {
        format!(" | {group}")
    };

    format!("{target} {group_part}")
}

/// Parse the full text of a profile file.
#[must_use]
pub fn parse(raw: &str) -> ProfileFields {
    let mut builder = FieldsBuilder::default();
    for line in raw.lines() {
        builder.feed(line);
    }
    builder.build()
}

/// Read and parse a profile file.
///
/// # Errors
///
/// Returns [`Error::NotAProfile`] if `path` does not exist or is not a
/// regular file, and [`Error::Io`] if reading it fails.
pub fn parse_file(path: &Path) -> Result<ProfileFields> {
    let metadata = match std::fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::NotAProfile(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };

    if !metadata.is_file() {
        return Err(Error::NotAProfile(path.to_path_buf()));
    }

    let bytes = std::fs::read(path)?;
    Ok(parse(&String::from_utf8_lossy(&bytes)))
}
