//! Keys used inside TagVal bodies.

pub const KEY_NAME_FIELD: &str = "NM";
pub const KEY_UUID_FIELD: &str = "UU";
pub const KEY_SERIAL_NO: &str = "US";
pub const KEY_VER_FIELD: &str = "VE";
pub const KEY_HB_INTERVAL: &str = "HI";
pub const KEY_HB_MODE: &str = "HR";
pub const KEY_PLATFORM_ID: &str = "PF";
pub const KEY_BOOT_TYPE_FIELD: &str = "BT";
pub const KEY_ID_FIELD: &str = "ID";
pub const KEY_CORRELATION_FIELD: &str = "IC";
pub const KEY_EEPROM_FIELD: &str = "IE";
pub const KEY_READONLY_FIELD: &str = "RO";
pub const KEY_VISIBLE_FIELD: &str = "VI";
pub const KEY_PARENT_ID_FIELD: &str = "PI";

pub const KEY_ALPHA_FIELD: &str = "RA";
pub const KEY_WIDTH_FIELD: &str = "WI";
pub const KEY_ANALOG_MAX_FIELD: &str = "AM";
pub const KEY_ANALOG_OFFSET_FIELD: &str = "AO";
pub const KEY_ANALOG_STEP_FIELD: &str = "AS";
pub const KEY_ANALOG_DIVISOR_FIELD: &str = "AD";
pub const KEY_ANALOG_UNIT_FIELD: &str = "AU";
pub const KEY_FLOAT_DECIMAL_PLACES: &str = "FD";
pub const KEY_NEGATIVE_ALLOWED: &str = "NA";
pub const KEY_REMOTE_NUM: &str = "RN";
pub const KEY_CURRENT_VAL: &str = "VC";
pub const KEY_BOOLEAN_NAMING: &str = "BN";
pub const KEY_NO_OF_CHOICES: &str = "NC";
pub const KEY_MAX_LENGTH: &str = "ML";
pub const KEY_EDIT_TYPE: &str = "EM";
pub const KEY_PREPEND_CHOICE: &str = "C";
pub const KEY_PREPEND_NAMECHOICE: &str = "c";

pub const KEY_CHANGE_TYPE: &str = "TC";
pub const KEY_ACK_STATUS: &str = "ST";

pub const KEY_MODE_FIELD: &str = "MO";
pub const KEY_BUTTON1_FIELD: &str = "B1";
pub const KEY_BUTTON2_FIELD: &str = "B2";
pub const KEY_BUFFER_FIELD: &str = "BU";
pub const KEY_HEADER_FIELD: &str = "HF";

/// Key of the `idx`th choice, `CA` to `CZ`, or `cA` to `cZ` for labels.
pub fn choice_key(prefix: &str, idx: usize) -> Option<String> {
    let letter = u8::try_from(idx).ok().filter(|i| *i < 26)?;
    Some(format!("{prefix}{}", (b'A' + letter) as char))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choice_keys_cover_alphabet() {
        assert_eq!(choice_key(KEY_PREPEND_CHOICE, 0).as_deref(), Some("CA"));
        assert_eq!(choice_key(KEY_PREPEND_NAMECHOICE, 25).as_deref(), Some("cZ"));
        assert_eq!(choice_key(KEY_PREPEND_CHOICE, 26), None);
    }
}
