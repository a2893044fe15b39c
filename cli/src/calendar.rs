use fruitlog_core::{CalendarDay, CalendarMonth, DateKey, FruitType};
use tabled::builder::Builder;
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};

const WEEKDAY_HEADERS: [&str; 7] = ["S", "M", "T", "W", "T", "F", "S"];

fn day_cell(day: &CalendarDay, today: &DateKey) -> String {
    let label = if &day.date == today {
        format!("[{}]", day.day)
    } else {
        day.day.to_string()
    };

    let fruits: Vec<String> = day
        .counts
        .active_fruits()
        .into_iter()
        .map(|fruit: FruitType| {
            let count = day.counts.get(fruit);
            if count > 1 {
                format!("{}{}", fruit.emoji(), count)
            } else {
                fruit.emoji().to_string()
            }
        })
        .collect();

    if fruits.is_empty() {
        label
    } else {
        format!("{}\n{}", label, fruits.join(""))
    }
}

pub fn show_calendar(view: &CalendarMonth, today: &DateKey) {
    let mut builder = Builder::default();
    builder.push_record(WEEKDAY_HEADERS.iter().map(|d| d.to_string()));

    for week in view.weeks() {
        let cells: Vec<String> = week
            .into_iter()
            .map(|cell| cell.map(|day| day_cell(day, today)).unwrap_or_default())
            .collect();
        builder.push_record(cells);
    }

    let mut table = builder.build();
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));

    println!("\x1b[1;36m{:04}-{:02}\x1b[0m ({} fruits)", view.year, view.month, view.total());
    println!("{}", table);
}

#[cfg(test)]
mod tests {
    use super::*;
    use fruitlog_core::DailyCount;

    fn day(date: &str, counts: DailyCount) -> CalendarDay {
        CalendarDay {
            date: DateKey::parse(date).unwrap(),
            day: date[8..].parse().unwrap(),
            total: counts.total(),
            counts,
        }
    }

    #[test]
    fn test_day_cell_marks_today_and_lists_fruits() {
        let today = DateKey::parse("2025-05-23").unwrap();
        let cell = day_cell(&day("2025-05-23", DailyCount { banana: 2, apple: 0, orange: 1 }), &today);
        assert_eq!(cell, "[23]\n🍌2🍊");
    }

    #[test]
    fn test_day_cell_without_fruit_is_just_the_number() {
        let today = DateKey::parse("2025-05-23").unwrap();
        assert_eq!(day_cell(&day("2025-05-04", DailyCount::default()), &today), "4");
    }
}
