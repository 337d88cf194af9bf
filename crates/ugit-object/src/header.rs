use crate::{ObjectError, ObjectType};

/// Parse an object header from raw bytes.
///
/// The serialized form is `"<type>\0<payload>"`. The split happens at the
/// first NUL byte only; the payload may contain further NUL bytes and must
/// round-trip bit-exact. Returns `(type, payload_start)` where
/// `payload_start` is the offset just past the NUL terminator.
pub fn parse_header(data: &[u8]) -> Result<(ObjectType, usize), ObjectError> {
    let null_pos = data
        .iter()
        .position(|&b| b == 0)
        .ok_or_else(|| ObjectError::InvalidHeader("missing null terminator".into()))?;

    let obj_type = ObjectType::from_bytes(&data[..null_pos])?;
    Ok((obj_type, null_pos + 1))
}

/// Write an object header: `"<type>\0"`.
pub fn write_header(obj_type: ObjectType) -> Vec<u8> {
    let mut out = Vec::with_capacity(obj_type.as_str().len() + 1);
    out.extend_from_slice(obj_type.as_str().as_bytes());
    out.push(0);
    out
}
