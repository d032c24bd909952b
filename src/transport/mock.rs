//! Mock transport for testing

use super::Transport;
use crate::error::Result;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// Mock transport for unit testing.
///
/// Clones share state, so a test can keep a handle while a device driver
/// owns another.
#[derive(Clone)]
pub struct MockTransport {
    inner: Arc<Mutex<MockTransportInner>>,
}

#[derive(Default)]
struct MockTransportInner {
    registers: HashMap<u8, u16>,
    word_writes: Vec<(u8, u16)>,
    raw_writes: Vec<Vec<u8>>,
    read_queue: VecDeque<Vec<u8>>,
    fail_next: bool,
}

impl MockTransport {
    /// Create a new mock transport
    pub fn new() -> Self {
        MockTransport {
            inner: Arc::new(Mutex::new(MockTransportInner::default())),
        }
    }

    /// Preload a register value for `read_word`
    pub fn set_register(&self, register: u8, value: u16) {
        let mut inner = self.inner.lock().unwrap();
        inner.registers.insert(register, value);
    }

    /// Queue one raw-read response; each `read` call consumes one entry
    pub fn queue_read(&self, data: &[u8]) {
        let mut inner = self.inner.lock().unwrap();
        inner.read_queue.push_back(data.to_vec());
    }

    /// Make the next operation fail with an injected I/O error
    pub fn fail_next(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_next = true;
    }

    /// All word writes, in order
    pub fn word_writes(&self) -> Vec<(u8, u16)> {
        self.inner.lock().unwrap().word_writes.clone()
    }

    /// All raw writes, in order
    pub fn raw_writes(&self) -> Vec<Vec<u8>> {
        self.inner.lock().unwrap().raw_writes.clone()
    }

    /// Drop recorded writes
    pub fn clear_writes(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.word_writes.clear();
        inner.raw_writes.clear();
    }
}

impl MockTransportInner {
    fn check_fault(&mut self) -> Result<()> {
        if self.fail_next {
            self.fail_next = false;
            return Err(std::io::Error::new(std::io::ErrorKind::Other, "injected fault").into());
        }
        Ok(())
    }
}

impl Transport for MockTransport {
    fn read_word(&mut self, register: u8) -> Result<u16> {
        let mut inner = self.inner.lock().unwrap();
        inner.check_fault()?;
        Ok(inner.registers.get(&register).copied().unwrap_or(0))
    }

    fn write_word(&mut self, register: u8, value: u16) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.check_fault()?;
        inner.word_writes.push((register, value));
        inner.registers.insert(register, value);
        Ok(())
    }

    fn write(&mut self, data: &[u8]) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.check_fault()?;
        inner.raw_writes.push(data.to_vec());
        Ok(())
    }

    fn read(&mut self, buffer: &mut [u8]) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.check_fault()?;
        match inner.read_queue.pop_front() {
            Some(data) if data.len() == buffer.len() => {
                buffer.copy_from_slice(&data);
                Ok(())
            }
            Some(data) => Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("queued read has {} bytes, caller wants {}", data.len(), buffer.len()),
            )
            .into()),
            None => Err(
                std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "read queue empty").into(),
            ),
        }
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}
