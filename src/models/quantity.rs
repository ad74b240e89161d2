//! 物料数量类型
//!
//! 每种物料（豆、粉、水、热水、咖啡）各有独立的数值类型，
//! 不同种类之间不能直接做算术运算，只能通过配方换算。

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul};

/// 每杯咖啡需要的水量（ml）
pub const WATER_PER_CUP: u32 = 180;

/// 每杯咖啡需要的豆量（g）
pub const BEANS_PER_CUP: u32 = 20;

/// 配方换算不溢出的最大杯数
///
/// 超过它时 `Coffee::water()` 等换算会超出 `u32` 范围。
pub const MAX_CUPS: u32 = u32::MAX / WATER_PER_CUP;

/// 所有物料数量类型的公共能力
///
/// 批量调度器依赖它对任意种类做分块，不关心具体单位。
pub trait Quantity:
    Copy + Ord + Default + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// 原始计数
    fn value(self) -> u32;

    /// 从原始计数构造
    fn from_value(value: u32) -> Self;

    fn zero() -> Self {
        Self::from_value(0)
    }

    fn is_zero(self) -> bool {
        self.value() == 0
    }
}

macro_rules! quantity {
    ($(#[$meta:meta])* $name:ident, $unit:literal, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(u32);

        impl $name {
            pub const fn new(value: u32) -> Self {
                Self(value)
            }

            pub const fn get(self) -> u32 {
                self.0
            }

            /// 减法，结果为负时返回 `None`
            pub fn checked_sub(self, rhs: Self) -> Option<Self> {
                self.0.checked_sub(rhs.0).map(Self)
            }

            pub fn saturating_sub(self, rhs: Self) -> Self {
                Self(self.0.saturating_sub(rhs.0))
            }
        }

        impl Quantity for $name {
            fn value(self) -> u32 {
                self.0
            }

            fn from_value(value: u32) -> Self {
                Self(value)
            }
        }

        impl Add for $name {
            type Output = Self;

            fn add(self, rhs: Self) -> Self {
                Self(self.0 + rhs.0)
            }
        }

        impl AddAssign for $name {
            fn add_assign(&mut self, rhs: Self) {
                self.0 += rhs.0;
            }
        }

        impl Mul<u32> for $name {
            type Output = Self;

            fn mul(self, rhs: u32) -> Self {
                Self(self.0 * rhs)
            }
        }

        /// 同种物料相除得到倍数（向下取整）
        impl Div for $name {
            type Output = u32;

            fn div(self, rhs: Self) -> u32 {
                self.0 / rhs.0
            }
        }

        impl std::iter::Sum for $name {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                iter.fold(Self::default(), Add::add)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!("{}", $unit, " ", $label), self.0)
            }
        }
    };
}

quantity!(
    /// 咖啡豆（g）
    Bean,
    "[g]",
    "beans"
);
quantity!(
    /// 研磨后的咖啡粉（g）
    GroundBean,
    "[g]",
    "ground beans"
);
quantity!(
    /// 冷水（ml）
    Water,
    "[ml]",
    "water"
);
quantity!(
    /// 热水（ml）
    HotWater,
    "[ml]",
    "hot water"
);
quantity!(
    /// 咖啡（杯）
    Coffee,
    "",
    "cup(s) coffee"
);

/// 以下换算要求杯数不超过 [`MAX_CUPS`]
impl Coffee {
    /// 冲泡这些咖啡需要的冷水
    pub fn water(self) -> Water {
        Water(WATER_PER_CUP * self.0)
    }

    /// 冲泡这些咖啡需要的热水
    pub fn hot_water(self) -> HotWater {
        HotWater(WATER_PER_CUP * self.0)
    }

    /// 冲泡这些咖啡需要的咖啡豆
    pub fn beans(self) -> Bean {
        Bean(BEANS_PER_CUP * self.0)
    }

    /// 冲泡这些咖啡需要的咖啡粉
    pub fn ground_beans(self) -> GroundBean {
        GroundBean(BEANS_PER_CUP * self.0)
    }
}

impl From<Water> for HotWater {
    fn from(water: Water) -> Self {
        HotWater(water.0)
    }
}

impl From<Bean> for GroundBean {
    fn from(beans: Bean) -> Self {
        GroundBean(beans.0)
    }
}
