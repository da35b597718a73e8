//! CRC32 (PNG chunk integrity) and Adler32 (zlib stream integrity).

/// Reflected CRC32 polynomial used by PNG and zlib.
pub const CRC32_POLY: u32 = 0xEDB8_8320;

const ADLER_MOD: u32 = 65_521;
// Largest byte count for which `b` cannot overflow u32 before reduction.
const ADLER_NMAX: usize = 5_552;

/// 256-entry lookup table for byte-at-a-time CRC32.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Crc32Table([u32; 256]);

/// The table used by [`crc32`] and [`Crc32::new`], built once at compile time.
pub static CRC32_TABLE: Crc32Table = Crc32Table::new();

impl Crc32Table {
    /// Build the table. Deterministic; every call yields an identical table.
    pub const fn new() -> Self {
        let mut table = [0u32; 256];
        let mut i = 0;
        while i < 256 {
            let mut c = i as u32;
            let mut k = 0;
            while k < 8 {
                c = if c & 1 != 0 { CRC32_POLY ^ (c >> 1) } else { c >> 1 };
                k += 1;
            }
            table[i] = c;
            i += 1;
        }
        Self(table)
    }

    pub fn entries(&self) -> &[u32; 256] {
        &self.0
    }

    /// One-shot CRC32 of `bytes`.
    pub fn checksum(&self, bytes: &[u8]) -> u32 {
        let mut h = Crc32::with_table(self);
        h.update(bytes);
        h.finish()
    }
}

impl Default for Crc32Table {
    fn default() -> Self {
        Self::new()
    }
}

/// Streaming CRC32 digest.
#[derive(Clone, Debug)]
pub struct Crc32<'t> {
    table: &'t Crc32Table,
    state: u32,
}

impl Crc32<'static> {
    pub fn new() -> Self {
        Self::with_table(&CRC32_TABLE)
    }
}

impl Default for Crc32<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'t> Crc32<'t> {
    pub fn with_table(table: &'t Crc32Table) -> Self {
        Self {
            table,
            state: 0xFFFF_FFFF,
        }
    }

    pub fn update(&mut self, bytes: &[u8]) {
        let mut c = self.state;
        for &b in bytes {
            c = self.table.0[((c ^ u32::from(b)) & 0xFF) as usize] ^ (c >> 8);
        }
        self.state = c;
    }

    pub fn finish(&self) -> u32 {
        self.state ^ 0xFFFF_FFFF
    }
}

/// CRC32 of `bytes` using [`CRC32_TABLE`].
pub fn crc32(bytes: &[u8]) -> u32 {
    CRC32_TABLE.checksum(bytes)
}

/// Streaming Adler32 digest.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Adler32 {
    a: u32,
    b: u32,
}

impl Adler32 {
    pub fn new() -> Self {
        Self { a: 1, b: 0 }
    }

    pub fn update(&mut self, bytes: &[u8]) {
        for block in bytes.chunks(ADLER_NMAX) {
            for &byte in block {
                self.a += u32::from(byte);
                self.b += self.a;
            }
            self.a %= ADLER_MOD;
            self.b %= ADLER_MOD;
        }
    }

    /// `(b << 16) | a`.
    pub fn finish(&self) -> u32 {
        (self.b << 16) | self.a
    }
}

impl Default for Adler32 {
    fn default() -> Self {
        Self::new()
    }
}

/// Adler32 of `bytes`.
pub fn adler32(bytes: &[u8]) -> u32 {
    let mut h = Adler32::new();
    h.update(bytes);
    h.finish()
}

#[cfg(test)]
#[path = "../../tests/unit/encode/checksum.rs"]
mod tests;
