use std::net::Ipv4Addr;

use crate::store::error::StoreError;

/// Longest value, in characters, a setting may hold.
pub const MAX_VALUE_LEN: usize = 255;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingType {
    String,
    Ipv4,
    Int8,
    Int16,
    Int32,
    Uint8,
    Uint16,
    Uint32,
    Hex,
}

impl SettingType {
    /// Short human-readable label shown on the info row.
    pub fn label(self) -> &'static str {
        match self {
            SettingType::String => "string",
            SettingType::Ipv4 => "IPv4 address",
            SettingType::Int8 => "8-bit integer",
            SettingType::Int16 => "16-bit integer",
            SettingType::Int32 => "32-bit integer",
            SettingType::Uint8 => "8-bit unsigned integer",
            SettingType::Uint16 => "16-bit unsigned integer",
            SettingType::Uint32 => "32-bit unsigned integer",
            SettingType::Hex => "hex string",
        }
    }

    fn int_range(self) -> Option<(i64, i64)> {
        match self {
            SettingType::Int8 => Some((i8::MIN as i64, i8::MAX as i64)),
            SettingType::Int16 => Some((i16::MIN as i64, i16::MAX as i64)),
            SettingType::Int32 => Some((i32::MIN as i64, i32::MAX as i64)),
            SettingType::Uint8 => Some((0, u8::MAX as i64)),
            SettingType::Uint16 => Some((0, u16::MAX as i64)),
            SettingType::Uint32 => Some((0, u32::MAX as i64)),
            _ => None,
        }
    }

    /// Validate `text` and return its canonical stored form.
    ///
    /// Input is truncated to [`MAX_VALUE_LEN`] characters before parsing.
    pub fn canonicalize(self, text: &str) -> Result<String, StoreError> {
        let text = truncate_chars(text, MAX_VALUE_LEN);
        let invalid = || StoreError::Invalid {
            kind: self.label(),
            value: text.to_string(),
        };

        match self {
            SettingType::String => Ok(text.to_string()),
            SettingType::Ipv4 => text
                .trim()
                .parse::<Ipv4Addr>()
                .map(|addr| addr.to_string())
                .map_err(|_| invalid()),
            SettingType::Hex => parse_hex(text).ok_or_else(invalid),
            _ => {
                let (min, max) = self.int_range().ok_or_else(invalid)?;
                let n = parse_int(text).ok_or_else(invalid)?;
                if n < min || n > max {
                    return Err(invalid());
                }
                Ok(n.to_string())
            }
        }
    }
}

/// Accepts decimal or `0x`-prefixed hexadecimal, with one optional sign.
fn parse_int(text: &str) -> Option<i64> {
    let text = text.trim();
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let (radix, digits) = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) => (16, hex),
        None => (10, digits),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    let magnitude = i64::from_str_radix(digits, radix).ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Colon-separated bytes of one or two hex digits, e.g. `0:1b:FF`.
fn parse_hex(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let mut bytes = Vec::new();
    for part in text.split(':') {
        if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        bytes.push(u8::from_str_radix(part, 16).ok()?);
    }
    Some(
        bytes
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect::<Vec<_>>()
            .join(":"),
    )
}

/// First `max` characters of `text`.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((byte, _)) => &text[..byte],
        None => text,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Setting {
    pub name: &'static str,
    pub kind: SettingType,
    pub description: &'static str,
}

impl Setting {
    pub const fn new(name: &'static str, kind: SettingType, description: &'static str) -> Self {
        Self {
            name,
            kind,
            description,
        }
    }
}

/// Settings offered by the console, in display order.
pub const BUILTIN_SETTINGS: &[Setting] = &[
    Setting::new("ip", SettingType::Ipv4, "IPv4 address"),
    Setting::new("netmask", SettingType::Ipv4, "IPv4 subnet mask"),
    Setting::new("gateway", SettingType::Ipv4, "Default gateway"),
    Setting::new("dns", SettingType::Ipv4, "DNS server"),
    Setting::new("hostname", SettingType::String, "Host name"),
    Setting::new("filename", SettingType::String, "Boot filename"),
    Setting::new("root-path", SettingType::String, "NFS/iSCSI root path"),
    Setting::new("username", SettingType::String, "User name"),
    Setting::new("password", SettingType::String, "Password"),
    Setting::new("priority", SettingType::Int8, "Priority of these options"),
    Setting::new("keep-san", SettingType::Uint8, "Preserve SAN connection"),
];
