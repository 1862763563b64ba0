//! Bundled catalog data. Nothing here changes at runtime.

use crate::models::{AnimeDetail, AnimeSummary, Character, NewsItem, Review};

fn tags(genres: &[&str]) -> Vec<String> {
    genres.iter().map(|g| g.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn summary(
    id: u32,
    title: &str,
    rating: f32,
    year: u16,
    genres: &[&str],
    episodes: u32,
    status: &str,
    description: &str,
    color: &str,
) -> AnimeSummary {
    AnimeSummary {
        id,
        title: title.into(),
        rating,
        year,
        genres: tags(genres),
        episodes,
        status: status.into(),
        description: description.into(),
        color: color.into(),
    }
}

fn character(id: u32, name: &str, role: &str, voice_actor: &str, color: &str) -> Character {
    Character {
        id,
        name: name.into(),
        role: role.into(),
        voice_actor: voice_actor.into(),
        color: color.into(),
    }
}

/// The home view catalog, in display order.
pub fn catalog() -> Vec<AnimeSummary> {
    vec![
        summary(
            1,
            "Атака титанов",
            9.1,
            2013,
            &["Экшен", "Драма", "Фэнтези"],
            75,
            "Завершён",
            "Человечество оказывается на грани вымирания из-за гигантских гуманоидных существ.",
            "#6E59A5",
        ),
        summary(
            2,
            "Стальной алхимик",
            9.0,
            2009,
            &["Приключения", "Фэнтези", "Драма"],
            64,
            "Завершён",
            "Два брата используют алхимию в поисках философского камня.",
            "#9b87f5",
        ),
        summary(
            3,
            "Стальной алхимик: Братство",
            8.9,
            2003,
            &["Приключения", "Фэнтези"],
            51,
            "Завершён",
            "История братьев Элрик, которые пытаются вернуть потерянное.",
            "#7E69AB",
        ),
        summary(
            4,
            "Ванпанчмен",
            8.7,
            2015,
            &["Экшен", "Комедия"],
            24,
            "Продолжается",
            "Супергерой, который может победить любого врага одним ударом.",
            "#E5DEFF",
        ),
        summary(
            5,
            "Наруто",
            8.5,
            2002,
            &["Экшен", "Приключения"],
            220,
            "Завершён",
            "Юный ниндзя мечтает стать главой своей деревни.",
            "#9b87f5",
        ),
        summary(
            6,
            "Моя геройская академия",
            8.6,
            2016,
            &["Экшен", "Супергерои"],
            113,
            "Продолжается",
            "Мир, где почти все обладают суперспособностями.",
            "#6E59A5",
        ),
    ]
}

/// Detail records. Only the first two catalog entries have one.
pub fn details() -> Vec<AnimeDetail> {
    vec![
        AnimeDetail {
            summary: summary(
                1,
                "Атака титанов",
                9.1,
                2013,
                &["Экшен", "Драма", "Фэнтези"],
                75,
                "Завершён",
                "Человечество оказывается на грани вымирания из-за гигантских гуманоидных существ.",
                "#6E59A5",
            ),
            full_description: "Сотни лет назад человечество было почти полностью уничтожено титанами — \
                гигантскими существами, которые охотятся на людей исключительно ради удовольствия. \
                Выжившие построили три огромные концентрические стены, которые защищали их от титанов \
                на протяжении целого столетия. Но мирная жизнь заканчивается, когда появляется \
                колоссальный титан и пробивает внешнюю стену."
                .into(),
            studio: "MAPPA, Wit Studio".into(),
            source: "Манга".into(),
            duration: "24 мин".into(),
            aired: "Апр 2013 - Апр 2023".into(),
            popularity: 1,
            members: 3_200_000,
            characters: vec![
                character(1, "Эрен Йегер", "Главный герой", "Юки Каджи", "#7E69AB"),
                character(2, "Микаса Аккерман", "Главная героиня", "Юи Исикава", "#9b87f5"),
                character(3, "Армин Арлерт", "Главный герой", "Марина Иноуэ", "#E5DEFF"),
                character(4, "Леви Аккерман", "Второстепенный", "Хироси Камия", "#6E59A5"),
            ],
            reviews: vec![
                Review {
                    id: 1,
                    author: "AnimeFan2024".into(),
                    rating: 10,
                    date: "20 ноября 2024".into(),
                    text: "Шедевр современной анимации. История держит в напряжении с первой серии \
                        до последней. Визуальное исполнение на высшем уровне."
                        .into(),
                    helpful: 342,
                },
                Review {
                    id: 2,
                    author: "OtakuMaster".into(),
                    rating: 9,
                    date: "15 ноября 2024".into(),
                    text: "Очень сильное аниме с глубоким сюжетом. Некоторые моменты немного \
                        затянуты, но в целом впечатления потрясающие."
                        .into(),
                    helpful: 128,
                },
            ],
        },
        AnimeDetail {
            summary: summary(
                2,
                "Стальной алхимик",
                9.0,
                2009,
                &["Приключения", "Фэнтези", "Драма"],
                64,
                "Завершён",
                "Два брата используют алхимию в поисках философского камня.",
                "#9b87f5",
            ),
            full_description: "После неудачной попытки оживить мать с помощью алхимии братья Элрик \
                начинают путешествие в поисках философского камня, чтобы восстановить свои тела."
                .into(),
            studio: "Bones".into(),
            source: "Манга".into(),
            duration: "24 мин".into(),
            aired: "Апр 2009 - Июл 2010".into(),
            popularity: 3,
            members: 2_800_000,
            characters: vec![
                character(1, "Эдвард Элрик", "Главный герой", "Ри Кугимия", "#9b87f5"),
                character(2, "Альфонс Элрик", "Главный герой", "Рие Кугимия", "#7E69AB"),
            ],
            reviews: Vec::new(),
        },
    ]
}

/// Headlines for the news tab.
pub fn news() -> Vec<NewsItem> {
    [
        (1, "Анонсирован новый сезон \"Атаки титанов\"", "15 ноября 2024"),
        (2, "Топ-10 самых ожидаемых аниме 2025 года", "10 ноября 2024"),
        (3, "Студия MAPPA открывает новый проект", "5 ноября 2024"),
    ]
    .into_iter()
    .map(|(id, title, date)| NewsItem {
        id,
        title: title.into(),
        date: date.into(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_are_unique() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 6);
        let mut ids: Vec<u32> = catalog.iter().map(|a| a.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 6);
    }

    #[test]
    fn test_details_agree_with_catalog() {
        let catalog = catalog();
        for detail in details() {
            let entry = catalog
                .iter()
                .find(|a| a.id == detail.summary.id)
                .expect("detail record without catalog entry");
            assert_eq!(entry, &detail.summary);
        }
    }
}
