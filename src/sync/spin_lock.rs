//! 自旋锁封装
//!
//! 基于 `spin` crate 的互斥锁做一层薄封装，统一加锁入口。
//! 不可重入（即不能嵌套调用 `SpinLock::lock()`）。
//! 中断屏蔽是嵌入方内核的职责：监视器运行期间假定独占执行环境。

use core::fmt;

/// 自旋锁结构体，提供互斥访问临界区的能力。
///
/// 使用示例：
/// ```ignore
/// let lock = SpinLock::new(0usize);
/// {
///     let mut guard = lock.lock(); // 获取锁
///     *guard += 1;
/// } // 离开作用域，自动释放锁
/// ```
pub struct SpinLock<T> {
    inner: spin::Mutex<T>,
}

/// 自动释放自旋锁的 RAII 保护器类型
pub type SpinLockGuard<'a, T> = spin::MutexGuard<'a, T>;

impl<T> SpinLock<T> {
    /// 创建一个新的自旋锁。
    pub const fn new(value: T) -> Self {
        SpinLock {
            inner: spin::Mutex::new(value),
        }
    }

    /// 获取自旋锁，并返回一个 RAII 保护器。
    pub fn lock(&self) -> SpinLockGuard<'_, T> {
        self.inner.lock()
    }

    /// 检查锁是否被占用 (仅用于调试/测试)
    pub fn is_locked(&self) -> bool {
        self.inner.is_locked()
    }
}

impl<T: fmt::Debug> fmt::Debug for SpinLock<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.inner, f)
    }
}
