use crate::error::GenError;
use arch::Reg;

/// Finite set of interchangeable work registers.
///
/// There is no spilling: running out of registers is an error. The
/// fixed-purpose registers (`Reg::RET`, `Reg::INIT`, `Ptr::ADDR`) never
/// enter the pool.
#[derive(Debug, Clone)]
pub struct RegisterPool {
    free: Vec<Reg>,
}

impl RegisterPool {
    pub fn new(size: usize) -> Self {
        Self {
            free: Reg::work(size),
        }
    }

    /// Take the lowest free register
    pub fn acquire(&mut self) -> Result<Reg, GenError> {
        if self.free.is_empty() {
            return Err(GenError::OutOfRegisters);
        }
        Ok(self.free.remove(0))
    }

    /// Give a register back. Releasing a register that is already free is a no-op.
    pub fn release(&mut self, reg: Reg) {
        if let Err(idx) = self.free.binary_search(&reg) {
            self.free.insert(idx, reg);
        }
    }

    pub fn available(&self) -> usize {
        self.free.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_lowest_first() {
        let mut pool = RegisterPool::new(3);
        assert_eq!(pool.acquire(), Ok(Reg::R5));
        assert_eq!(pool.acquire(), Ok(Reg::R6));
        assert_eq!(pool.acquire(), Ok(Reg::R7));
        assert_eq!(pool.available(), 0);
    }

    #[test]
    fn exhausted() {
        let mut pool = RegisterPool::new(1);
        assert_eq!(pool.acquire(), Ok(Reg::R5));
        assert_eq!(pool.acquire(), Err(GenError::OutOfRegisters));
    }

    #[test]
    fn release_reuses_register() {
        let mut pool = RegisterPool::new(2);
        let a = pool.acquire().unwrap();
        let b = pool.acquire().unwrap();
        pool.release(a);
        assert_eq!(pool.acquire(), Ok(a));
        pool.release(b);
        pool.release(a);
        assert_eq!(pool.available(), 2);
    }

    #[test]
    fn double_release_is_idempotent() {
        let mut pool = RegisterPool::new(3);
        let reg = pool.acquire().unwrap();
        pool.release(reg);
        pool.release(reg);
        assert_eq!(pool.available(), 3);
    }
}
