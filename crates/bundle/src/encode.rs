//! Canonical bundle encoding.
//!
//! A bundle is the protobuf message `Bundle { repeated bytes txs = 1; }`.
//! Each transaction is framed as the tag byte [`BUNDLE_TXS_TAG`], the length
//! as a varint, then the raw bytes. Frames are concatenated in bundle order
//! with no outer prefix. This is the byte sequence the sentinel hashes when
//! it checks a bundle signature.
use crate::EncodingError;
use alloy::primitives::Bytes;
use prost::{
    encoding::{encode_key, encode_varint, encoded_len_varint, key_len, WireType},
    Message,
};

/// Field number of the transaction list.
pub const BUNDLE_TXS_FIELD: u32 = 1;

/// Tag byte for field 1 with wire type 2 (length-delimited).
pub const BUNDLE_TXS_TAG: u8 = 0x0A;

/// The protobuf bundle message.
#[derive(Clone, PartialEq, Message)]
pub struct ProtoBundle {
    /// Raw transactions, in bundle order.
    #[prost(bytes = "bytes", repeated, tag = "1")]
    pub txs: Vec<prost::bytes::Bytes>,
}

impl ProtoBundle {
    /// Copy transactions into a message.
    pub fn from_txs<T: AsRef<[u8]>>(txs: &[T]) -> Self {
        Self {
            txs: txs.iter().map(|tx| prost::bytes::Bytes::copy_from_slice(tx.as_ref())).collect(),
        }
    }
}

/// Exact length of [`encode`]'s output for these transactions.
pub fn encoded_len<T: AsRef<[u8]>>(txs: &[T]) -> usize {
    txs.iter()
        .map(|tx| {
            let len = tx.as_ref().len();
            key_len(BUNDLE_TXS_FIELD) + encoded_len_varint(len as u64) + len
        })
        .sum()
}

/// Append the canonical encoding of `txs` to `buf`.
///
/// Writes the same bytes as [`ProtoBundle::encode`] without copying the
/// transactions into a message first.
pub fn encode_to<T: AsRef<[u8]>>(txs: &[T], buf: &mut Vec<u8>) {
    buf.reserve(encoded_len(txs));
    for tx in txs {
        let tx = tx.as_ref();
        encode_key(BUNDLE_TXS_FIELD, WireType::LengthDelimited, buf);
        encode_varint(tx.len() as u64, buf);
        buf.extend_from_slice(tx);
    }
}

/// Canonically encode an ordered list of transactions.
///
/// The output is a pure function of the input order and contents. An empty
/// list encodes to an empty byte string.
pub fn encode<T: AsRef<[u8]>>(txs: &[T]) -> Bytes {
    let mut buf = Vec::with_capacity(encoded_len(txs));
    encode_to(txs, &mut buf);
    buf.into()
}

/// Split a canonical encoding back into its transactions.
///
/// Input that decodes as a [`ProtoBundle`] but is not exactly what [`encode`]
/// would produce for the decoded transactions (unknown fields, padded
/// varints) is rejected with [`EncodingError::NonCanonical`].
pub fn decode(buf: &[u8]) -> Result<Vec<Bytes>, EncodingError> {
    let bundle = ProtoBundle::decode(buf)?;
    let expected = bundle.encoded_len();
    if expected != buf.len() {
        return Err(EncodingError::NonCanonical { expected, actual: buf.len() });
    }
    Ok(bundle.txs.into_iter().map(Bytes::from).collect())
}

/// Concatenate transactions with no framing at all.
///
/// Bundle signatures are never computed over this form. It is kept for
/// comparing against relays that hash the raw concatenation.
pub fn flatten<T: AsRef<[u8]>>(txs: &[T]) -> Bytes {
    let mut buf = Vec::with_capacity(txs.iter().map(|tx| tx.as_ref().len()).sum());
    for tx in txs {
        buf.extend_from_slice(tx.as_ref());
    }
    buf.into()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_bundle_encodes_to_nothing() {
        let txs: [&[u8]; 0] = [];
        assert!(encode(&txs).is_empty());
        assert_eq!(encoded_len(&txs), 0);
    }

    #[test]
    fn frames_single_tx() {
        assert_eq!(&encode(&[[0xABu8, 0xCD]])[..], &[0x0A, 0x02, 0xAB, 0xCD]);
    }

    #[test]
    fn frames_empty_tx() {
        assert_eq!(&encode(&[b""])[..], &[0x0A, 0x00]);
    }

    #[test]
    fn multi_byte_varint_length() {
        let tx = vec![0x11; 300];
        let encoded = encode(&[&tx]);

        assert_eq!(&encoded[..3], &[0x0A, 0xAC, 0x02]);
        assert_eq!(&encoded[3..], tx.as_slice());
        assert_eq!(encoded.len(), encoded_len(&[&tx]));
    }

    #[test]
    fn encoded_len_is_exact() {
        for len in [0usize, 1, 127, 128, 300, 16_383, 16_384] {
            let tx = vec![0x5A; len];
            assert_eq!(encode(&[&tx]).len(), encoded_len(&[&tx]), "len {len}");
        }
    }

    #[test]
    fn matches_message_encoding() {
        let txs = [b"test".to_vec(), vec![], vec![0x07; 300], vec![0x01; 20_000]];
        let message = ProtoBundle::from_txs(&txs);

        assert_eq!(&encode(&txs)[..], message.encode_to_vec().as_slice());
        assert_eq!(encoded_len(&txs), message.encoded_len());
    }

    #[test]
    fn encoding_is_deterministic() {
        let txs = [b"first".as_slice(), b"second", b""];
        assert_eq!(encode(&txs), encode(&txs));
    }

    #[test]
    fn encoding_is_order_sensitive() {
        let a = b"alpha".as_slice();
        let b = b"beta".as_slice();
        assert_ne!(encode(&[a, b]), encode(&[b, a]));
    }

    #[test]
    fn frames_concatenate() {
        let encoded = encode(&[b"ab".as_slice(), b"c"]);
        assert_eq!(&encoded[..], &[0x0A, 0x02, b'a', b'b', 0x0A, 0x01, b'c']);
    }

    #[test]
    fn decode_inverts_encode() {
        let txs: Vec<Bytes> = vec![b"tx1".into(), Bytes::new(), vec![7u8; 1000].into()];
        assert_eq!(decode(&encode(&txs)).unwrap(), txs);
    }

    #[test]
    fn decode_empty() {
        assert!(decode(&[]).unwrap().is_empty());
    }

    #[test]
    fn decode_rejects_unknown_field() {
        // A valid frame followed by an empty field 2.
        let err = decode(&[0x0A, 0x01, 0xFF, 0x12, 0x00]).unwrap_err();
        assert_eq!(err, EncodingError::NonCanonical { expected: 3, actual: 5 });
    }

    #[test]
    fn decode_rejects_padded_varint() {
        // Length 1 written as a two byte varint.
        let err = decode(&[0x0A, 0x81, 0x00, 0xFF]).unwrap_err();
        assert_eq!(err, EncodingError::NonCanonical { expected: 3, actual: 4 });
    }

    #[test]
    fn decode_rejects_wrong_wire_type() {
        let err = decode(&[0x08, 0x01]).unwrap_err();
        assert!(matches!(err, EncodingError::Decode(_)));
    }

    #[test]
    fn decode_rejects_truncated_body() {
        let err = decode(&[0x0A, 0x05, 0x01, 0x02]).unwrap_err();
        assert!(matches!(err, EncodingError::Decode(_)));
    }

    #[test]
    fn decode_rejects_truncated_varint() {
        let err = decode(&[0x0A, 0x01, 0x00, 0x0A, 0x80]).unwrap_err();
        assert!(matches!(err, EncodingError::Decode(_)));
    }

    #[test]
    fn decode_rejects_overlong_varint() {
        let mut buf = vec![0x0A];
        buf.extend([0xFF; 10]);
        buf.push(0x02);
        let err = decode(&buf).unwrap_err();
        assert!(matches!(err, EncodingError::Decode(_)));
    }

    #[test]
    fn flatten_has_no_framing() {
        assert_eq!(&flatten(&[b"ab".as_slice(), b"", b"c"])[..], b"abc");
    }
}
