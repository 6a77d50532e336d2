/// A sequential producer of bytes.
///
/// This is the subset of `std::io::Read` the decoder needs. With the `std`
/// feature every `io::Read` implements it; without it, byte slices do.
pub trait ByteSource {
    /// Error produced by [`read`](ByteSource::read). The decoder hands it
    /// back unchanged inside [`DecodeError::Source`](crate::DecodeError::Source).
    type Error;

    /// Reads up to `buf.len()` bytes into `buf` and returns how many were
    /// written. Returning `Ok(0)` signals the end of the stream.
    ///
    /// # Errors
    ///
    /// Any failure of the underlying source. The decoder does not retry.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

#[cfg(feature = "std")]
impl<R: std::io::Read> ByteSource for R {
    type Error = std::io::Error;

    #[inline]
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        std::io::Read::read(self, buf)
    }
}

#[cfg(not(feature = "std"))]
impl ByteSource for &[u8] {
    type Error = core::convert::Infallible;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let n = core::cmp::min(buf.len(), self.len());
        let (head, tail) = self.split_at(n);
        buf[..n].copy_from_slice(head);
        *self = tail;
        Ok(n)
    }
}
