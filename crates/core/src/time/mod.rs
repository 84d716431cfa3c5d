pub mod mm_calendar;
