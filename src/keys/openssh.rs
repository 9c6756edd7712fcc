//! Single-line OpenSSH public key encoding: `<algorithm> <base64(blob)>`,
//! where the blob is the RFC 4253 wire representation of the key.

use openssl::base64;

pub const SSH_RSA: &str = "ssh-rsa";
pub const SSH_ED25519: &str = "ssh-ed25519";

pub fn rsa_public_key_line(e: &[u8], n: &[u8]) -> String {
    let mut blob = Vec::new();
    write_string(&mut blob, SSH_RSA.as_bytes());
    write_mpint(&mut blob, e);
    write_mpint(&mut blob, n);
    format!("{} {}", SSH_RSA, base64::encode_block(&blob))
}

pub fn ed25519_public_key_line(public_key: &[u8]) -> String {
    let mut blob = Vec::new();
    write_string(&mut blob, SSH_ED25519.as_bytes());
    write_string(&mut blob, public_key);
    format!("{} {}", SSH_ED25519, base64::encode_block(&blob))
}

/// RFC 4253 `string`: u32 big-endian length prefix followed by the bytes.
fn write_string(buf: &mut Vec<u8>, data: &[u8]) {
    buf.extend_from_slice(&(data.len() as u32).to_be_bytes());
    buf.extend_from_slice(data);
}

/// RFC 4253 `mpint`: minimal big-endian two's complement. Positive values
/// whose high bit is set get a leading zero byte.
fn write_mpint(buf: &mut Vec<u8>, bytes: &[u8]) {
    let mut start = 0;
    while start < bytes.len() && bytes[start] == 0 {
        start += 1;
    }
    let stripped = &bytes[start..];

    let pad = !stripped.is_empty() && stripped[0] & 0x80 != 0;
    let length = stripped.len() + usize::from(pad);
    buf.extend_from_slice(&(length as u32).to_be_bytes());
    if pad {
        buf.push(0);
    }
    buf.extend_from_slice(stripped);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_is_length_prefixed() {
        let mut buf = Vec::new();
        write_string(&mut buf, b"ssh-rsa");
        assert_eq!([0, 0, 0, 7, b's', b's', b'h', b'-', b'r', b's', b'a'], buf[..]);
    }

    #[test]
    fn mpint_pads_high_bit_values() {
        let mut buf = Vec::new();
        write_mpint(&mut buf, &[0x80]);
        assert_eq!([0, 0, 0, 2, 0x00, 0x80], buf[..]);
    }

    #[test]
    fn mpint_strips_leading_zeros() {
        let mut buf = Vec::new();
        write_mpint(&mut buf, &[0x00, 0x00, 0x01, 0x00, 0x01]);
        assert_eq!([0, 0, 0, 3, 0x01, 0x00, 0x01], buf[..]);
    }

    #[test]
    fn mpint_zero_is_empty() {
        let mut buf = Vec::new();
        write_mpint(&mut buf, &[0x00]);
        assert_eq!([0, 0, 0, 0], buf[..]);
    }

    #[test]
    fn ed25519_line_decodes_back_to_wire_blob() {
        let public_key = [7u8; 32];
        let line = ed25519_public_key_line(&public_key);
        let (algorithm, b64) = line.split_once(' ').unwrap();
        assert_eq!(SSH_ED25519, algorithm);

        let blob = base64::decode_block(b64).unwrap();
        assert_eq!(&blob[..4], &[0, 0, 0, 11]);
        assert_eq!(&blob[4..15], SSH_ED25519.as_bytes());
        assert_eq!(&blob[15..19], &[0, 0, 0, 32]);
        assert_eq!(&blob[19..], &public_key[..]);
    }
}
