//! Output sinks shared by a group tree.

use std::cell::RefCell;
use std::fmt;
use std::io::{self, Write};
use std::rc::Rc;

/// Handle to the writer a group and all of its sub-groups print to.
///
/// Cloning the handle shares the underlying writer. Write failures never
/// panic; they are reported on stderr and the run continues.
#[derive(Clone)]
pub struct Sink {
    inner: Rc<RefCell<Box<dyn Write>>>,
}

impl Sink {
    pub fn new(writer: impl Write + 'static) -> Self {
        let writer: Box<dyn Write> = Box::new(writer);
        Self {
            inner: Rc::new(RefCell::new(writer)),
        }
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }

    /// Write `text` without a trailing newline and flush immediately.
    pub fn write_flushed(&self, text: &str) {
        let mut out = self.inner.borrow_mut();
        warn_on_error(out.write_all(text.as_bytes()));
        warn_on_error(out.flush());
    }

    /// Write `text` followed by a newline.
    pub fn write_line(&self, text: &str) {
        let mut out = self.inner.borrow_mut();
        warn_on_error(writeln!(out, "{}", text));
    }

    pub fn flush(&self) {
        warn_on_error(self.inner.borrow_mut().flush());
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink").finish_non_exhaustive()
    }
}

fn warn_on_error(res: io::Result<()>) {
    if let Err(e) = res {
        let _ = writeln!(
            io::stderr(),
            "Warning: failed to write benchmark output: {}",
            e
        );
    }
}

/// In-memory writer whose clones share one buffer.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    buf: Rc<RefCell<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded as UTF-8.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.borrow()).into_owned()
    }

    pub fn clear(&self) {
        self.buf.borrow_mut().clear();
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.borrow_mut().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
