//! Block tags and record sizes of the AKOS container.

/// Outer container tag
pub const TAG_AKOS: [u8; 4] = *b"AKOS";
/// Header block
pub const TAG_AKHD: [u8; 4] = *b"AKHD";
/// Costume palette block
pub const TAG_AKPL: [u8; 4] = *b"AKPL";
/// Preview colours block (optional)
pub const TAG_RGBS: [u8; 4] = *b"RGBS";
/// Limb bytecode block
pub const TAG_AKSQ: [u8; 4] = *b"AKSQ";
/// Animation table block
pub const TAG_AKCH: [u8; 4] = *b"AKCH";
/// Cel offset table block
pub const TAG_AKOF: [u8; 4] = *b"AKOF";
/// Cel info block
pub const TAG_AKCI: [u8; 4] = *b"AKCI";
/// Cel data block
pub const TAG_AKCD: [u8; 4] = *b"AKCD";

/// Size of a block header (tag + big-endian size)
pub const BLOCK_HEADER_SIZE: usize = 8;

/// Size of the `AKHD` payload
pub const HEADER_SIZE: usize = 10;

/// Size of one `AKOF` entry
pub const OFFSET_ENTRY_SIZE: usize = 6;

/// Size of one `AKCI` record
pub const CEL_INFO_SIZE: usize = 12;

/// Header flag: costume faces the other way by default
pub const FLAG_MIRROR_DEFAULT: u8 = 0x01;

/// Maximum number of limbs (bits of the animation limb mask)
pub const MAX_LIMBS: usize = 16;
