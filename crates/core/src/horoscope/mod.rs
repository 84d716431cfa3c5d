pub mod orchestrator;
pub mod prompt;
pub mod state;

/// Shown to the user whenever a horoscope could not be produced.
pub const FAILURE_MESSAGE: &str =
    "ဟောစာတမ်း တွက်ချက်မှုတွင် အမှားအယွင်းရှိနေပါသည်။ ခေတ္တစောင့်ဆိုင်းပြီး ပြန်လည်ကြိုးစားပေးပါ။";
