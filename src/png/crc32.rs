//! The CRC-32 used by PNG chunks (ISO 3309 polynomial, reflected).

/// The CRC of every possible low byte, so the main loop does one lookup per
/// input byte instead of eight shift steps.
const CRC_TABLE: [u32; 256] = make_crc_table();

/// Builds [`CRC_TABLE`] at compile time, one bit at a time.
const fn make_crc_table() -> [u32; 256] {
  let mut out = [0; 256];
  let mut n = 0;
  while n < 256 {
    let mut c = n as u32;
    let mut k = 0;
    while k < 8 {
      if (c & 1) != 0 {
        c = 0xEDB8_8320_u32 ^ (c >> 1);
      } else {
        c >>= 1;
      }
      k += 1;
    }
    out[n] = c;
    n += 1;
  }
  out
}

/// Feeds more bytes into a running CRC register.
///
/// The register isn't pre or post conditioned here, [`png_crc`] does that.
fn update_crc(mut crc: u32, iter: impl Iterator<Item = u8>) -> u32 {
  for byte in iter {
    let i = (crc ^ u32::from(byte)) as u8 as usize;
    crc = CRC_TABLE[i] ^ (crc >> 8);
  }
  crc
}

/// Computes the CRC of all bytes from the iterator.
///
/// For a chunk, that's the chunk type followed by the chunk data. The length
/// field is *not* included.
#[inline]
#[must_use]
pub fn png_crc(iter: impl Iterator<Item = u8>) -> u32 {
  update_crc(u32::MAX, iter) ^ u32::MAX
}
