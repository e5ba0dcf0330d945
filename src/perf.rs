use std::cell::Cell;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Once;
use std::time::Instant;

static SLOW_OP_THRESHOLD_MS: AtomicU64 = AtomicU64::new(0);
static INIT_THRESHOLD: Once = Once::new();

thread_local! {
    static PERF_DEPTH: Cell<u32> = Cell::new(0);
}

/// 慢操作阈值（毫秒）
///
/// - `CONTAGEM_ESTOQUE_SLOW_OP_MS=200` 配置阈值
/// - 未配置时: Debug 500ms,Release 2000ms
/// - 设为 0 关闭慢操作告警
fn slow_threshold_ms() -> u64 {
    INIT_THRESHOLD.call_once(|| {
        let ms = std::env::var("CONTAGEM_ESTOQUE_SLOW_OP_MS")
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(if cfg!(debug_assertions) { 500 } else { 2000 });
        SLOW_OP_THRESHOLD_MS.store(ms, Ordering::Relaxed);
    });
    SLOW_OP_THRESHOLD_MS.load(Ordering::Relaxed)
}

/// 性能统计 Guard：记录 elapsed_ms + 处理行数 + 嵌套深度
///
/// 使用方式：
/// ```ignore
/// let mut perf = contagem_estoque::perf::PerfGuard::new("load");
/// // do work...
/// perf.set_rows(table.len());
/// ```
pub struct PerfGuard {
    op: &'static str,
    start: Instant,
    rows: usize,
    depth: u32,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        let depth = PERF_DEPTH.with(|d| {
            let next = d.get().saturating_add(1);
            d.set(next);
            next
        });
        Self {
            op,
            start: Instant::now(),
            rows: 0,
            depth,
        }
    }

    /// 记录本次操作处理的行数
    pub fn set_rows(&mut self, rows: usize) {
        self.rows = rows;
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        let elapsed_ms = self.elapsed_ms();
        let threshold = slow_threshold_ms();

        if threshold > 0 && elapsed_ms >= threshold {
            tracing::warn!(
                target: "perf",
                op = self.op,
                elapsed_ms,
                rows = self.rows,
                "slow operation"
            );
        } else {
            tracing::info!(
                target: "perf",
                op = self.op,
                elapsed_ms,
                rows = self.rows,
                depth = self.depth,
                "done"
            );
        }

        PERF_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}
