//! Binary payloads crossing the native boundary.

use prost::Message;
use crate::core::error::Result;
use crate::entity::{Entity, EntityList};

pub fn decode<E: Entity>(bytes: &[u8]) -> Result<E> {
    Ok(E::decode(bytes)?)
}

/// Entities of a list payload, in payload order.
pub fn decode_list<E: Entity>(bytes: &[u8]) -> Result<Vec<E>> {
    Ok(E::List::decode(bytes)?.into_items())
}

pub fn encode_list<E: Entity>(items: Vec<E>) -> Vec<u8> {
    E::List::from_items(items).encode_to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ErrorKind;
    use crate::entity::{Artist, ArtistList};

    #[test]
    fn list_payload_keeps_order() {
        let artists = vec![
            Artist { id: "ar2".into(), name: "Queen".into(), ..Default::default() },
            Artist { id: "ar1".into(), name: "ABBA".into(), bio: Some("Swedish".into()), ..Default::default() },
        ];

        let bytes = encode_list(artists.clone());
        assert_eq!(ArtistList::decode(bytes.as_slice()).unwrap().artists, artists);
        assert_eq!(decode_list::<Artist>(&bytes).unwrap(), artists);
    }

    #[test]
    fn malformed_payload_is_a_decode_error() {
        // Field 1, length-delimited, claims 10 bytes but carries 2.
        let err = decode::<Artist>(&[0x0a, 0x0a, b'a', b'b']).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Decode);
    }
}
