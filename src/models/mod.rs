pub mod quantity;

pub use quantity::{
    Bean, Coffee, GroundBean, HotWater, Quantity, Water, BEANS_PER_CUP, MAX_CUPS,
    WATER_PER_CUP,
};
