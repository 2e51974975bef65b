//! Packet layout for GU7000 commands.
//!
//! A packet is a short header (opcode plus fixed parameters) followed by
//! an optional borrowed payload. Only image commands carry a payload, and
//! it is never copied: the header lives on the stack and the packed pixel
//! buffer is referenced in place.

use heapless::Vec;

/// Maximum header size in bytes (image: 4 opcode + 4 params + 1 mode)
pub const MAX_HEADER_LEN: usize = 9;

/// An encoded command ready for the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet<'a> {
    header: Vec<u8, MAX_HEADER_LEN>,
    payload: &'a [u8],
}

impl<'a> Packet<'a> {
    /// Create a packet from a header and payload
    ///
    /// Returns `None` if the header exceeds [`MAX_HEADER_LEN`].
    pub fn new(header: &[u8], payload: &'a [u8]) -> Option<Self> {
        let mut vec = Vec::new();
        vec.extend_from_slice(header).ok()?;
        Some(Self {
            header: vec,
            payload,
        })
    }

    /// Opcode and parameter bytes
    pub fn header(&self) -> &[u8] {
        &self.header
    }

    /// Payload bytes (empty for everything but images)
    pub fn payload(&self) -> &'a [u8] {
        self.payload
    }

    /// Total encoded length
    pub fn len(&self) -> usize {
        self.header.len() + self.payload.len()
    }

    /// Check if the packet has no bytes at all
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over the encoded bytes in wire order
    pub fn bytes(&self) -> impl Iterator<Item = u8> + '_ {
        self.header.iter().chain(self.payload.iter()).copied()
    }
}
