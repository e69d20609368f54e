use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crate::constants::{CLOCK_HZ, CYCLES_PER_TIMER_TICK};
use crate::cpu::Cpu;
use crate::display::Display;
use crate::error::Error;
use crate::keyboard::Keyboard;

/// # Vm
///
/// Owns a [`Cpu`] and schedules it. While running, a worker thread executes
/// one cycle per clock tick and counts the timers down every
/// [`CYCLES_PER_TIMER_TICK`] cycles. The worker owns the machine for as long
/// as it runs; stopping joins the worker and takes the machine back along
/// with the fault that halted it, if any.
///
/// A fault stops the worker on its own, but the machine state and the fault
/// stay with the dead worker until [`stop`](Vm::stop) collects them.
pub struct Vm {
    cpu: Option<Cpu>,
    worker: Option<JoinHandle<(Cpu, Option<Error>)>>,
    running: Arc<AtomicBool>,
    keyboard: Arc<dyn Keyboard>,
    program: Vec<u8>,
    fault: Option<Error>,
}

impl Vm {
    /// Builds a stopped machine with `program` imaged into memory.
    pub fn new(
        program: Vec<u8>,
        display: Arc<dyn Display>,
        keyboard: Arc<dyn Keyboard>,
    ) -> Result<Self, Error> {
        let mut cpu = Cpu::new(display, keyboard.clone());
        cpu.load_program(&program)?;
        Ok(Vm {
            cpu: Some(cpu),
            worker: None,
            running: Arc::new(AtomicBool::new(false)),
            keyboard,
            program,
            fault: None,
        })
    }

    /// Starts cycling on the worker thread. Ignored if already running.
    pub fn run(&mut self) {
        if self.is_running() {
            return;
        }
        // Collect the machine from a worker that halted on its own.
        self.stop();
        let mut cpu = match self.cpu.take() {
            Some(cpu) => cpu,
            None => return,
        };
        self.keyboard.resume_waits();
        self.running.store(true, Ordering::SeqCst);
        let running = self.running.clone();
        let worker = thread::Builder::new()
            .name("cpu".to_string())
            .spawn(move || {
                let cycle_time = Duration::from_nanos(1_000_000_000 / CLOCK_HZ);
                let mut cycles: u64 = 0;
                let mut fault = None;
                log::debug!("cycling every {:?}", cycle_time);
                while running.load(Ordering::SeqCst) {
                    let start = Instant::now();
                    if let Err(error) = cpu.cycle() {
                        log::error!("halting: {}", error);
                        fault = Some(error);
                        running.store(false, Ordering::SeqCst);
                        break;
                    }
                    cycles = cycles.wrapping_add(1);
                    if cycles % CYCLES_PER_TIMER_TICK == 0 {
                        cpu.tick_timers();
                    }
                    if let Some(remaining) = cycle_time.checked_sub(start.elapsed()) {
                        spin_sleep::sleep(remaining);
                    }
                }
                (cpu, fault)
            })
            .expect("the cpu thread failed to spawn");
        self.worker = Some(worker);
    }

    /// Halts the worker and takes the machine back.
    ///
    /// Cancels any blocked key wait so the in-flight cycle can retire, then
    /// joins. Records the fault the run ended with, which is `None` when the
    /// machine was stopped from outside.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        self.keyboard.cancel_waits();
        if let Some(worker) = self.worker.take() {
            let (cpu, fault) = worker.join().expect("the cpu thread panicked");
            self.cpu = Some(cpu);
            self.fault = fault;
        }
    }

    /// Halts the machine, re-images memory with the original program, clears
    /// any recorded fault, and resumes cycling from the origin.
    pub fn reset(&mut self) -> Result<(), Error> {
        self.stop();
        if let Some(cpu) = self.cpu.as_mut() {
            cpu.reset();
            cpu.load_program(&self.program)?;
        }
        self.fault = None;
        self.run();
        Ok(())
    }

    /// Whether the worker is still cycling.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// The fault collected at the last [`stop`](Vm::stop), if any.
    pub fn fault(&self) -> Option<Error> {
        self.fault
    }
}

impl Drop for Vm {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod test_vm {
    use std::sync::{Condvar, Mutex};

    use super::*;
    use crate::constants::{MEMORY_CAPACITY, PROGRAM_ORIGIN};
    use crate::display::NullDisplay;
    use crate::keyboard::NullKeyboard;
    use crate::registers::Register;

    /// Blocks key waits until cancelled and never reports a key.
    struct BlockingKeyboard {
        cancelled: Mutex<bool>,
        signal: Condvar,
    }

    impl BlockingKeyboard {
        fn new() -> Self {
            BlockingKeyboard {
                cancelled: Mutex::new(false),
                signal: Condvar::new(),
            }
        }
    }

    impl Keyboard for BlockingKeyboard {
        fn is_pressed(&self, _key: u8) -> bool {
            false
        }

        fn wait_for_key_press(&self) -> Option<u8> {
            let mut cancelled = self.cancelled.lock().unwrap();
            while !*cancelled {
                cancelled = self.signal.wait(cancelled).unwrap();
            }
            None
        }

        fn cancel_waits(&self) {
            *self.cancelled.lock().unwrap() = true;
            self.signal.notify_all();
        }

        fn resume_waits(&self) {
            *self.cancelled.lock().unwrap() = false;
        }
    }

    fn vm(program: Vec<u8>) -> Vm {
        Vm::new(program, Arc::new(NullDisplay), Arc::new(NullKeyboard)).unwrap()
    }

    /// Polls until the machine halts on its own or the deadline passes.
    fn wait_for_halt(vm: &Vm) {
        for _ in 0..500 {
            if !vm.is_running() {
                return;
            }
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn test_oversized_programs_are_rejected() {
        let result = Vm::new(
            vec![0x0; MEMORY_CAPACITY - PROGRAM_ORIGIN as usize + 1],
            Arc::new(NullDisplay),
            Arc::new(NullKeyboard),
        );
        assert_eq!(result.err(), Some(Error::InvalidAddress(MEMORY_CAPACITY)));
    }

    #[test]
    fn test_a_faulting_program_halts_the_machine() {
        let mut vm = vm(vec![0xFF, 0xFF]);
        vm.run();
        wait_for_halt(&vm);
        assert!(!vm.is_running());
        vm.stop();
        assert_eq!(vm.fault(), Some(Error::InvalidInstruction(0xFFFF)));
    }

    #[test]
    fn test_stop_hands_back_the_machine() {
        // LD V0, 0xA then spin on a jump-to-self.
        let mut vm = vm(vec![0x60, 0x0A, 0x12, 0x02]);
        vm.run();
        thread::sleep(Duration::from_millis(50));
        vm.stop();
        assert!(!vm.is_running());
        assert_eq!(vm.fault(), None);
        assert_eq!(vm.cpu.as_ref().unwrap().registers[Register::V0], 0xA);
    }

    #[test]
    fn test_timers_tick_while_running() {
        // LD V0, 0xFF; LD DT, V0; spin.
        let mut vm = vm(vec![0x60, 0xFF, 0xF0, 0x15, 0x12, 0x04]);
        vm.run();
        thread::sleep(Duration::from_millis(100));
        vm.stop();
        assert_eq!(vm.fault(), None);
        assert!(vm.cpu.as_ref().unwrap().registers.delay < 0xFF);
    }

    #[test]
    fn test_reset_clears_the_fault_and_restarts() {
        let mut vm = vm(vec![0xFF, 0xFF]);
        vm.run();
        wait_for_halt(&vm);
        vm.stop();
        assert!(vm.fault().is_some());
        vm.reset().unwrap();
        assert_eq!(vm.fault(), None);
        // The machine is cycling again from the origin, so it trips over the
        // same word; a resumed counter would have read 0x0000 instead.
        wait_for_halt(&vm);
        vm.stop();
        assert_eq!(vm.fault(), Some(Error::InvalidInstruction(0xFFFF)));
        let cpu = vm.cpu.as_ref().unwrap();
        assert_eq!(cpu.program_counter.address(), PROGRAM_ORIGIN + 0x2);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut vm = vm(vec![0x12, 0x00]);
        vm.run();
        vm.stop();
        vm.stop();
        assert!(!vm.is_running());
    }

    #[test]
    fn test_run_while_running_is_ignored() {
        let mut vm = vm(vec![0x12, 0x00]);
        vm.run();
        vm.run();
        vm.stop();
        assert!(!vm.is_running());
    }

    #[test]
    fn test_stop_cancels_a_blocked_wait() {
        let keyboard = Arc::new(BlockingKeyboard::new());
        let mut vm = Vm::new(vec![0xF0, 0x0A], Arc::new(NullDisplay), keyboard).unwrap();
        vm.run();
        thread::sleep(Duration::from_millis(50));
        // Joins the worker; the test passes by not hanging here.
        vm.stop();
        assert_eq!(vm.fault(), None);
        assert_eq!(vm.cpu.as_ref().unwrap().registers[Register::V0], 0x0);
    }

    #[test]
    fn test_dropping_halts_the_worker() {
        let mut vm = vm(vec![0x12, 0x00]);
        vm.run();
        // Dropping joins the worker; the test passes by not hanging.
    }
}
