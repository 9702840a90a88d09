//! Strict decoding and per-character byte offsets.
//!
//! Encoding labels are resolved through `encoding_rs` (WHATWG labels, so
//! `"utf-8"`, `"utf8"`, `"latin1"`, `"windows-1252"`, `"shift_jis"`, ...).
//! Decoding never substitutes U+FFFD and never strips a byte-order mark: a
//! leading BOM survives as U+FEFF at char index 0, where canonicalization
//! deletes it with an explicit op so its bytes stay accounted for.

use std::borrow::Cow;

use encoding_rs::{DecoderResult, Encoder, EncoderResult, Encoding, UTF_16BE, UTF_16LE, UTF_8};

use crate::error::CanonicalError;

/// Looks up an encoding by label.
pub fn resolve_encoding(label: &str) -> Result<&'static Encoding, CanonicalError> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| CanonicalError::UnknownEncoding(label.to_string()))
}

/// Decodes `bytes` under `label`, failing on the first malformed sequence.
pub fn decode_strict<'a>(bytes: &'a [u8], label: &str) -> Result<Cow<'a, str>, CanonicalError> {
    let encoding = resolve_encoding(label)?;

    if encoding == UTF_8 {
        return std::str::from_utf8(bytes)
            .map(Cow::Borrowed)
            .map_err(|err| CanonicalError::Decode {
                encoding: label.to_string(),
                offset: err.valid_up_to(),
            });
    }

    let mut decoder = encoding.new_decoder_without_bom_handling();
    let mut out = String::with_capacity(
        decoder
            .max_utf8_buffer_length_without_replacement(bytes.len())
            .unwrap_or(bytes.len()),
    );
    let mut consumed = 0usize;
    loop {
        let (result, read) =
            decoder.decode_to_string_without_replacement(&bytes[consumed..], &mut out, true);
        consumed += read;
        match result {
            DecoderResult::InputEmpty => return Ok(Cow::Owned(out)),
            DecoderResult::OutputFull => {
                let remaining = bytes.len() - consumed;
                out.reserve(
                    decoder
                        .max_utf8_buffer_length_without_replacement(remaining)
                        .unwrap_or(remaining)
                        .max(4),
                );
            }
            DecoderResult::Malformed(bad, after) => {
                return Err(CanonicalError::Decode {
                    encoding: label.to_string(),
                    offset: consumed.saturating_sub(bad as usize + after as usize),
                });
            }
        }
    }
}

/// Prefix sum of encoded character lengths.
///
/// Entry `k` is the number of bytes the first `k` characters of `text`
/// occupy under `label`, so the result has `text.chars().count() + 1`
/// entries and starts with 0.
///
/// UTF-8 and UTF-16 are computed arithmetically. Other encodings run one
/// streaming encoder over the text, so stateful encodings (ISO-2022-JP) pay
/// for a mode switch only when the mode changes. The bytes of the final flush
/// (returning to ASCII mode) belong to the last entry.
pub fn compute_byte_starts(text: &str, label: &str) -> Result<Vec<usize>, CanonicalError> {
    let encoding = resolve_encoding(label)?;
    let mut starts = Vec::with_capacity(text.len() + 1);
    starts.push(0);

    if encoding == UTF_8 {
        starts.extend(text.chars().scan(0usize, |acc, ch| {
            *acc += ch.len_utf8();
            Some(*acc)
        }));
        return Ok(starts);
    }
    if encoding == UTF_16LE || encoding == UTF_16BE {
        starts.extend(text.chars().scan(0usize, |acc, ch| {
            *acc += ch.len_utf16() * 2;
            Some(*acc)
        }));
        return Ok(starts);
    }

    let encode_error = |index: usize, ch: char| CanonicalError::Encode {
        encoding: label.to_string(),
        index,
        ch,
    };

    // `new_encoder` hands out a UTF-8 encoder for encodings it cannot produce.
    if encoding.output_encoding() != encoding {
        return match text.chars().next() {
            Some(ch) => Err(encode_error(0, ch)),
            None => Ok(starts),
        };
    }

    let mut encoder = encoding.new_encoder();
    let mut buf = [0u8; 32];
    let mut utf8 = [0u8; 4];
    let mut acc = 0usize;
    for (index, ch) in text.chars().enumerate() {
        acc += encode_chunk(&mut encoder, ch.encode_utf8(&mut utf8), false, &mut buf)
            .map_err(|ch| encode_error(index, ch))?;
        starts.push(acc);
    }

    let flushed = encode_chunk(&mut encoder, "", true, &mut buf).map_err(|ch| {
        encode_error(text.chars().count().saturating_sub(1), ch)
    })?;
    if let Some(last) = starts.last_mut() {
        *last += flushed;
    }

    Ok(starts)
}

/// Feeds `src` through `encoder`, returning the number of bytes produced or
/// the first unmappable character.
fn encode_chunk(
    encoder: &mut Encoder,
    mut src: &str,
    last: bool,
    buf: &mut [u8],
) -> Result<usize, char> {
    let mut written_total = 0usize;
    loop {
        let (result, read, written) =
            encoder.encode_from_utf8_without_replacement(src, buf, last);
        written_total += written;
        match result {
            EncoderResult::InputEmpty => return Ok(written_total),
            EncoderResult::OutputFull => src = &src[read..],
            EncoderResult::Unmappable(ch) => return Err(ch),
        }
    }
}
