use super::map::CsrWidth;

/// Anything that can carry a register transaction of a given width.
///
/// Values travel as `u32`; a write stores only the low `width` bits. Failures
/// are whatever the transport reports, untouched.
pub trait CsrBus {
    type Error;

    fn read(&mut self, address: usize, width: CsrWidth) -> Result<u32, Self::Error>;

    fn write(&mut self, address: usize, value: u32, width: CsrWidth) -> Result<(), Self::Error>;
}

impl<B: CsrBus + ?Sized> CsrBus for &mut B {
    type Error = B::Error;

    #[inline(always)]
    fn read(&mut self, address: usize, width: CsrWidth) -> Result<u32, Self::Error> {
        (**self).read(address, width)
    }

    #[inline(always)]
    fn write(&mut self, address: usize, value: u32, width: CsrWidth) -> Result<(), Self::Error> {
        (**self).write(address, value, width)
    }
}
