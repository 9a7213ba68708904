//! 资源网格
//!
//! 行主序存储：`cells[r * horizon + t]` 表示资源 `r` 在相对时间步 `t` 上的数值。

use serde::{Deserialize, Serialize};

/// 网格形状：资源种类数 × 时间窗口长度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridShape {
    pub resources: usize,
    pub horizon: usize,
}

impl GridShape {
    pub fn new(resources: usize, horizon: usize) -> Self {
        Self { resources, horizon }
    }

    pub fn cells(&self) -> usize {
        self.resources.saturating_mul(self.horizon)
    }
}

/// 二维资源张量（资源 × 时间步），元素为非负实数。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceGrid {
    shape: GridShape,
    cells: Vec<f64>,
}

impl ResourceGrid {
    /// 全零网格
    pub fn zeros(shape: GridShape) -> Self {
        Self::filled(shape, 0.0)
    }

    /// 所有单元填充同一数值
    pub fn filled(shape: GridShape, value: f64) -> Self {
        Self {
            shape,
            cells: vec![value; shape.cells()],
        }
    }

    /// 由逐行数据构造；各行长度必须一致。
    ///
    /// # Panics
    ///
    /// 行长度不一致时 panic。
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        let horizon = rows.first().map_or(0, Vec::len);
        assert!(
            rows.iter().all(|row| row.len() == horizon),
            "ragged resource grid rows"
        );
        let shape = GridShape::new(rows.len(), horizon);
        Self {
            shape,
            cells: rows.into_iter().flatten().collect(),
        }
    }

    pub fn shape(&self) -> GridShape {
        self.shape
    }

    pub fn resources(&self) -> usize {
        self.shape.resources
    }

    pub fn horizon(&self) -> usize {
        self.shape.horizon
    }

    fn index(&self, resource: usize, t: usize) -> usize {
        assert!(
            resource < self.shape.resources && t < self.shape.horizon,
            "grid cell ({resource}, {t}) out of range for {:?}",
            self.shape
        );
        resource * self.shape.horizon + t
    }

    pub fn get(&self, resource: usize, t: usize) -> f64 {
        self.cells[self.index(resource, t)]
    }

    pub fn set(&mut self, resource: usize, t: usize, value: f64) {
        let idx = self.index(resource, t);
        self.cells[idx] = value;
    }

    /// 某一资源在整个窗口上的取值
    pub fn row(&self, resource: usize) -> &[f64] {
        let start = resource * self.shape.horizon;
        &self.cells[start..start + self.shape.horizon]
    }

    fn row_mut(&mut self, resource: usize) -> &mut [f64] {
        let start = resource * self.shape.horizon;
        &mut self.cells[start..start + self.shape.horizon]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        (0..self.shape.resources).map(move |r| self.row(r))
    }

    /// 将资源 `resource` 的前 `len` 个时间步填为 `value`，其余置零。
    pub fn fill_prefix(&mut self, resource: usize, len: usize, value: f64) {
        let row = self.row_mut(resource);
        let len = len.min(row.len());
        row[..len].fill(value);
        row[len..].fill(0.0);
    }

    /// 资源 `resource` 的有效长度：最后一个非零时间步 + 1。
    pub fn active_len(&self, resource: usize) -> usize {
        self.row(resource)
            .iter()
            .rposition(|&v| v != 0.0)
            .map_or(0, |t| t + 1)
    }

    /// 所有资源有效长度的最大值
    pub fn max_active_len(&self) -> usize {
        (0..self.shape.resources)
            .map(|r| self.active_len(r))
            .max()
            .unwrap_or(0)
    }

    pub fn is_zero(&self) -> bool {
        self.cells.iter().all(|&v| v == 0.0)
    }

    pub fn all_finite_nonnegative(&self) -> bool {
        self.cells.iter().all(|&v| v.is_finite() && v >= 0.0)
    }

    /// 第一个非负有限性检查失败的单元 `(resource, t, value)`
    pub fn first_invalid_cell(&self) -> Option<(usize, usize, f64)> {
        let horizon = self.shape.horizon.max(1);
        self.cells
            .iter()
            .position(|&v| !(v.is_finite() && v >= 0.0))
            .map(|i| (i / horizon, i % horizon, self.cells[i]))
    }

    /// 逐元素差 `self - other`（形状必须一致）
    pub fn difference(&self, other: &ResourceGrid) -> ResourceGrid {
        assert_eq!(self.shape, other.shape, "grid shape mismatch");
        ResourceGrid {
            shape: self.shape,
            cells: self
                .cells
                .iter()
                .zip(&other.cells)
                .map(|(a, b)| a - b)
                .collect(),
        }
    }

    /// 判断把 `demand` 叠加到 `self`（占用）后是否仍不超过 `capacity`。
    ///
    /// `demand` 的窗口可以比 `self` 短，只检查其覆盖的时间步。
    /// 比较的是 `usage + demand <= capacity`，与 `add_prefix` 实际写入的值一致。
    pub fn fits_with(&self, demand: &ResourceGrid, capacity: &ResourceGrid) -> bool {
        assert_eq!(self.shape, capacity.shape, "grid shape mismatch");
        assert_eq!(
            self.shape.resources, demand.shape.resources,
            "resource count mismatch"
        );
        assert!(demand.shape.horizon <= self.shape.horizon, "demand window too long");

        (0..demand.shape.resources).all(|r| {
            let used = self.row(r);
            let cap = capacity.row(r);
            demand
                .row(r)
                .iter()
                .enumerate()
                .all(|(t, &d)| used[t] + d <= cap[t])
        })
    }

    /// 把 `demand` 逐元素加到窗口前缀上（原地，无分配）。
    pub fn add_prefix(&mut self, demand: &ResourceGrid) {
        assert_eq!(
            self.shape.resources, demand.shape.resources,
            "resource count mismatch"
        );
        assert!(demand.shape.horizon <= self.shape.horizon, "demand window too long");

        for r in 0..demand.shape.resources {
            let src = demand.row(r);
            let dst = self.row_mut(r);
            for (cell, &d) in dst.iter_mut().zip(src) {
                *cell += d;
            }
        }
    }

    /// 时间轴左移一步：丢弃第 0 步，末尾补零。
    pub fn shift(&mut self) {
        self.shift_with(|_| 0.0);
    }

    /// 时间轴左移一步：丢弃第 0 步，末尾重复原来的最后一步。
    pub fn shift_repeat_last(&mut self) {
        self.shift_with(|last| last);
    }

    fn shift_with(&mut self, fill: impl Fn(f64) -> f64) {
        let horizon = self.shape.horizon;
        if horizon == 0 {
            return;
        }
        for r in 0..self.shape.resources {
            let row = self.row_mut(r);
            let last = row[horizon - 1];
            row.copy_within(1.., 0);
            row[horizon - 1] = fill(last);
        }
    }
}
