pub mod contract;
pub mod day;
pub mod horoscope;
