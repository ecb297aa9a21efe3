//! Introduction screen copy.

pub const COURSE_TITLE: &str = "Swing Trading Academy";
pub const COURSE_SUBTITLE: &str = "Based on Alan Farley's \"The Master Swing Trader\"";

pub const WELCOME: &str = "Master the art of swing trading with principles from Alan Farley's \
    renowned book \"The Master Swing Trader\". This interactive course will teach you the \
    essential concepts and strategies used by professional traders.";

pub const WHAT_IS_SWING_TRADING: &str = "Swing trading is a strategy that attempts to capture \
    gains in a stock within 1 to 7 days. Unlike day trading, swing traders hold positions \
    overnight and for several days, targeting medium-term price movements.";

pub const CORE_PRINCIPLES: &[(&str, &str)] = &[
    (
        "Pattern Recognition",
        "Learn to identify classic chart patterns like head and shoulders, double tops/bottoms, \
         and continuation patterns that signal potential trades.",
    ),
    (
        "Risk Management",
        "Master the 2% rule, position sizing, and stop-loss placement to protect your capital \
         and survive in the markets long-term.",
    ),
    (
        "Multiple Timeframes",
        "Use daily, weekly, and intraday charts together to confirm trends and find optimal \
         entry points with multiple timeframe analysis.",
    ),
    (
        "Entry & Exit Rules",
        "Develop systematic entry and exit strategies using support/resistance levels, \
         Fibonacci retracements, and momentum indicators.",
    ),
];

pub const METHODOLOGY: &[(&str, &str)] = &[
    (
        "Pattern Cycles",
        "Markets move through predictable cycles of accumulation, markup, distribution, and markdown",
    ),
    (
        "Support/Resistance",
        "Price memory creates levels where buyers and sellers repeatedly battle",
    ),
    (
        "3D Charting",
        "Analyze price, volume, and time together for complete market understanding",
    ),
    (
        "Trend Mechanics",
        "Trade with the trend using pullbacks and breakouts for best probability",
    ),
];

pub const LEARNING_PATH: &[(&str, &str)] = &[
    ("Pattern Recognition", "Learn to spot classic chart patterns and understand what they mean"),
    ("Risk Management", "Calculate position sizes and set proper stop-losses"),
    ("Timeframe Analysis", "Use multiple timeframes to confirm your trading decisions"),
    ("Entry & Exit Strategies", "Develop systematic rules for when to enter and exit trades"),
    ("Test Your Knowledge", "Complete the quiz to verify your understanding"),
];
