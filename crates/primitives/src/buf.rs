//! Fixed-size byte buffer newtypes.

impl_buf!(Buf20, 20);
impl_buf!(Buf32, 32);
impl_buf!(Buf33, 33);
