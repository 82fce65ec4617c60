// src/portal/pages/words.rs

use crate::{
    models::word::Word,
    portal::{
        pages::{Ctx, failed, push_paged, table},
        pagination::Pager,
        query::QueryKey,
        view::{Cell, PageView, Section},
    },
};

pub(crate) const WORD_COLUMNS: [&str; 5] = ["Spanish", "Transliteration", "Arabic", "Correct", "Wrong"];

/// Table row of a word; the Spanish text links to the word when `linked`.
pub(crate) fn word_row(word: &Word, linked: bool) -> Vec<Cell> {
    let spanish = if linked {
        Cell::link(word.spanish.clone(), format!("/words/{}", word.id))
    } else {
        Cell::text(word.spanish.clone())
    };
    vec![
        spanish,
        Cell::text(word.transliteration.clone()),
        Cell::text(word.arabic.clone()),
        Cell::text(word.correct_count.to_string()),
        Cell::text(word.wrong_count.to_string()),
    ]
}

pub async fn list(ctx: Ctx<'_>, pager: &mut Pager) -> PageView {
    let page = pager.page();
    let result = ctx
        .cache
        .fetch(QueryKey::new("words").page(page), || ctx.client.words(page))
        .await;

    let mut view = PageView::new("Words");
    push_paged(&mut view, "Words", "words", pager, result, |words| {
        table(
            "Words",
            WORD_COLUMNS.to_vec(),
            words.iter().map(|w| word_row(w, true)).collect(),
            "No words found",
        )
    });
    view
}

pub async fn detail(ctx: Ctx<'_>, id: i64) -> PageView {
    let result = ctx
        .cache
        .fetch(QueryKey::new("word").id(id), || ctx.client.word(id))
        .await;

    let mut view = PageView::new("Word Details");
    let word = match result {
        Ok(word) => word,
        Err(err) => {
            view.push(failed("Word Information", &err));
            return view;
        }
    };

    view.push(Section::Stats {
        title: "Word Information".to_string(),
        items: vec![
            ("Spanish".to_string(), Cell::text(word.spanish.clone())),
            ("Transliteration".to_string(), Cell::text(word.transliteration.clone())),
            ("Arabic".to_string(), Cell::text(word.arabic.clone())),
        ],
    });
    view.push(Section::Links {
        title: "Groups".to_string(),
        links: word
            .groups
            .iter()
            .map(|g| Cell::link(g.name.clone(), format!("/groups/{}", g.id)))
            .collect(),
    });
    view.push(Section::Stats {
        title: "Study Statistics".to_string(),
        items: vec![
            ("Correct Answers".to_string(), Cell::text(word.correct_count.to_string())),
            ("Wrong Answers".to_string(), Cell::text(word.wrong_count.to_string())),
        ],
    });
    view
}
