//! 同步原语
//!
//! 监视器自身是单线程的，这里的锁只用于保护与内核其余部分共享的
//! 全局状态（帧分配器、日志缓冲区）。

mod spin_lock;

pub use spin_lock::{SpinLock, SpinLockGuard};
