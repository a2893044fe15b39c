use fruitlog_core::{DailyCount, DateKey, FruitType, MonthlyStats};
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};

const BAR_WIDTH: usize = 30;

#[derive(Tabled)]
struct CounterRow {
    #[tabled(rename = "Fruit")]
    fruit: String,
    #[tabled(rename = "Today")]
    today: u32,
    #[tabled(rename = "This month")]
    month: u64,
}

#[derive(Tabled)]
struct MonthRow {
    #[tabled(rename = "Fruit")]
    fruit: String,
    #[tabled(rename = "Count")]
    count: u64,
    #[tabled(rename = "Share")]
    share: String,
}

fn fruit_cell(fruit: FruitType) -> String {
    format!("{} {}", fruit.emoji(), fruit.label())
}

fn styled(mut table: Table) -> Table {
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    table
}

pub fn show_counter(today: &DateKey, counts: &DailyCount, stats: &MonthlyStats) {
    let rows: Vec<CounterRow> = FruitType::ALL
        .into_iter()
        .map(|fruit| CounterRow {
            fruit: fruit_cell(fruit),
            today: counts.get(fruit),
            month: stats.count(fruit),
        })
        .collect();

    println!("\x1b[1;36mToday · {}\x1b[0m", today);
    println!("{}", styled(Table::new(rows)));
    println!("Monthly total: {} fruits", stats.total());
}

pub fn show_month(year: i32, month: u32, stats: &MonthlyStats) {
    println!("\x1b[1;36m{:04}-{:02}\x1b[0m", year, month);

    if stats.total() == 0 {
        println!("No fruit logged this month.");
        return;
    }

    let rows: Vec<MonthRow> = FruitType::ALL
        .into_iter()
        .map(|fruit| MonthRow {
            fruit: fruit_cell(fruit),
            count: stats.count(fruit),
            share: format!("{:.0}%", stats.share(fruit) * 100.0),
        })
        .collect();

    println!("{}", styled(Table::new(rows)));
    println!("Total: {} fruits", stats.total());
    println!("{}", breakdown_bar(stats));
}

// Proportional bar, one glyph per fruit, like the counter view's stacked bar.
fn breakdown_bar(stats: &MonthlyStats) -> String {
    let mut bar = String::new();
    for fruit in FruitType::ALL {
        let width = (stats.share(fruit) * BAR_WIDTH as f64).round() as usize;
        let glyph = match fruit {
            FruitType::Banana => "\x1b[33m█\x1b[0m",
            FruitType::Apple => "\x1b[31m█\x1b[0m",
            FruitType::Orange => "\x1b[38;5;208m█\x1b[0m",
        };
        bar.push_str(&glyph.repeat(width));
    }
    bar
}
