//! Test doubles for the host link and the shift-register bus.

use heapless::{Deque, Vec};

use crate::consts::HOST_PACKET_LEN;
use crate::transport::{HostLink, ShiftBus};

/// Host link fed from a queue of packets that records everything written.
#[derive(Debug, Default)]
pub(crate) struct FakeHost {
    incoming: Deque<Vec<u8, HOST_PACKET_LEN>, 8>,
    output: Vec<u8, 2048>,
    packet_lens: Vec<usize, 128>,
    config_changed: bool,
    busy: u8,
    busy_polls: u8,
    fail: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct FakeHostError;

impl FakeHost {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_packet(&mut self, data: &[u8]) {
        let packet = Vec::from_slice(data).unwrap();
        self.incoming.push_back(packet).unwrap();
    }

    pub(crate) fn reconnect(&mut self) {
        self.config_changed = true;
    }

    pub(crate) fn busy_for(&mut self, polls: u8) {
        self.busy = polls;
    }

    pub(crate) fn fail_writes(&mut self) {
        self.fail = true;
    }

    pub(crate) fn output(&self) -> &[u8] {
        &self.output
    }

    pub(crate) fn packet_lens(&self) -> &[usize] {
        &self.packet_lens
    }

    pub(crate) fn busy_polls(&self) -> u8 {
        self.busy_polls
    }

    pub(crate) fn clear_output(&mut self) {
        self.output.clear();
        self.packet_lens.clear();
    }
}

impl HostLink for FakeHost {
    type Error = FakeHostError;

    fn configuration_changed(&mut self) -> bool {
        core::mem::take(&mut self.config_changed)
    }

    fn read_packet(&mut self, buf: &mut [u8]) -> nb::Result<usize, FakeHostError> {
        let packet = self.incoming.pop_front().ok_or(nb::Error::WouldBlock)?;
        buf[..packet.len()].copy_from_slice(&packet);
        Ok(packet.len())
    }

    fn write_packet(&mut self, data: &[u8]) -> nb::Result<(), FakeHostError> {
        if self.fail {
            return Err(nb::Error::Other(FakeHostError));
        }
        if self.busy > 0 {
            self.busy -= 1;
            self.busy_polls += 1;
            return Err(nb::Error::WouldBlock);
        }
        assert!(data.len() <= HOST_PACKET_LEN);
        self.output.extend_from_slice(data).unwrap();
        self.packet_lens.push(data.len()).unwrap();
        Ok(())
    }
}

/// Shift bus that keeps everything queued until [`FakeBus::shift_out`].
#[derive(Debug, Default)]
pub(crate) struct FakeBus {
    queue: Vec<u8, 256>,
    arrays: Vec<Vec<u8, 32>, 8>,
}

impl FakeBus {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Arrays passed to `put_array`, in order.
    pub(crate) fn arrays(&self) -> &[Vec<u8, 32>] {
        &self.arrays
    }

    pub(crate) fn queued(&self) -> &[u8] {
        &self.queue
    }

    /// Empties the queue as if the bus had finished shifting.
    pub(crate) fn shift_out(&mut self) {
        self.queue.clear();
    }
}

impl ShiftBus for FakeBus {
    fn put_byte(&mut self, byte: u8) {
        self.queue.push(byte).unwrap();
    }

    fn put_array(&mut self, data: &[u8]) {
        self.queue.extend_from_slice(data).unwrap();
        self.arrays.push(Vec::from_slice(data).unwrap()).unwrap();
    }

    fn queue_depth(&self) -> usize {
        self.queue.len()
    }

    fn clear_queue(&mut self) {
        self.queue.clear();
    }
}
