use crate::error::{QuizError, Result};
use crate::filter::ActiveSubset;
use crate::models::{Direction, NameField, Plant, Question};
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

/// Correct answer plus two distractors.
pub const OPTION_COUNT: usize = 3;

pub fn distinct_names(subset: &ActiveSubset, field: NameField) -> usize {
    subset
        .plants()
        .iter()
        .map(|plant| plant.name(field))
        .collect::<HashSet<_>>()
        .len()
}

/// Picks a random plant and direction from the subset and builds a question.
///
/// Only directions whose answer column has at least [`OPTION_COUNT`] distinct
/// values are drawn.
pub fn next_question<R: Rng + ?Sized>(subset: &ActiveSubset, rng: &mut R) -> Result<Question> {
    let counts = Direction::ALL.map(|direction| distinct_names(subset, direction.answer_field()));
    let answerable: Vec<Direction> = Direction::ALL
        .into_iter()
        .zip(counts)
        .filter(|(_, distinct)| *distinct >= OPTION_COUNT)
        .map(|(direction, _)| direction)
        .collect();

    let Some(&direction) = answerable.choose(rng) else {
        let distinct = counts.into_iter().max().unwrap_or(0);
        return Err(QuizError::InsufficientOptions { distinct });
    };
    let plant = subset
        .plants()
        .choose(rng)
        .ok_or(QuizError::InsufficientOptions { distinct: 0 })?
        .clone();

    build_question(subset, plant, direction, rng)
}

pub fn build_question<R: Rng + ?Sized>(
    subset: &ActiveSubset,
    plant: Plant,
    direction: Direction,
    rng: &mut R,
) -> Result<Question> {
    let field = direction.answer_field();
    let distinct = distinct_names(subset, field);
    if distinct < OPTION_COUNT {
        return Err(QuizError::InsufficientOptions { distinct });
    }

    let correct_answer = plant.name(field).to_string();
    let mut options = vec![correct_answer.clone()];
    while options.len() < OPTION_COUNT {
        let Some(candidate) = subset.plants().choose(rng) else {
            break;
        };
        let name = candidate.name(field);
        if !options.iter().any(|option| option == name) {
            options.push(name.to_string());
        }
    }
    options.shuffle(rng);

    let prompt = direction.prompt(plant.name(direction.shown_field()));
    tracing::debug!(number = plant.number, ?direction, "generated question");

    Ok(Question {
        prompt,
        direction,
        correct_answer,
        options,
        plant,
        answered: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::filter;
    use crate::models::{Dataset, NO_SELECTION};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn trees() -> Dataset {
        Dataset::new(
            "Trees",
            vec![
                Plant::new(1, "Eik", "Quercus robur"),
                Plant::new(2, "Beuk", "Fagus sylvatica"),
                Plant::new(3, "Es", "Fraxinus excelsior"),
            ],
        )
        .unwrap()
    }

    fn larger() -> Dataset {
        let names = [
            ("Eik", "Quercus robur"),
            ("Beuk", "Fagus sylvatica"),
            ("Es", "Fraxinus excelsior"),
            ("Linde", "Tilia cordata"),
            ("Wilg", "Salix alba"),
            ("Berk", "Betula pendula"),
            ("Els", "Alnus glutinosa"),
        ];
        let plants = names
            .iter()
            .enumerate()
            .map(|(i, (common, scientific))| Plant::new(i as i64 + 1, common, scientific))
            .collect();
        Dataset::new("Trees", plants).unwrap()
    }

    #[test]
    fn test_build_question_common_from_scientific() {
        let dataset = trees();
        let subset = filter(&dataset, 1, 3).unwrap();
        assert_eq!(subset.len(), 3);

        let mut rng = StdRng::seed_from_u64(7);
        let plant = subset.plants()[0].clone();
        let question =
            build_question(&subset, plant, Direction::CommonFromScientific, &mut rng).unwrap();

        assert!(question.prompt.contains("Quercus robur"));
        assert_eq!(question.correct_answer, "Eik");
        let mut options = question.options.clone();
        options.sort();
        assert_eq!(options, vec!["Beuk", "Eik", "Es"]);
        assert!(!question.answered);
    }

    #[test]
    fn test_build_question_scientific_from_common() {
        let dataset = trees();
        let subset = filter(&dataset, 1, 3).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let plant = subset.plants()[1].clone();
        let question =
            build_question(&subset, plant, Direction::ScientificFromCommon, &mut rng).unwrap();

        assert!(question.prompt.contains("'Beuk'"));
        assert_eq!(question.correct_answer, "Fagus sylvatica");
        assert!(question.options.contains(&"Fagus sylvatica".to_string()));
    }

    #[test]
    fn test_next_question_always_has_three_distinct_options() {
        let dataset = larger();
        let subset = filter(&dataset, 1, 7).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..200 {
            let question = next_question(&subset, &mut rng).unwrap();
            assert_eq!(question.options.len(), OPTION_COUNT);
            let unique: HashSet<&String> = question.options.iter().collect();
            assert_eq!(unique.len(), OPTION_COUNT);
            assert!(question.options.contains(&question.correct_answer));
            assert_eq!(
                question.plant.name(question.direction.answer_field()),
                question.correct_answer
            );
            assert!(subset.plants().contains(&question.plant));
        }
    }

    #[test]
    fn test_next_question_uses_both_directions() {
        let dataset = larger();
        let subset = filter(&dataset, 1, 7).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let directions: HashSet<_> = (0..100)
            .map(|_| next_question(&subset, &mut rng).unwrap().direction)
            .collect();
        assert_eq!(directions.len(), 2);
    }

    #[test]
    fn test_too_few_plants_is_insufficient_options() {
        let dataset = larger();
        let subset = filter(&dataset, 1, 2).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let err = next_question(&subset, &mut rng).unwrap_err();
        assert!(matches!(err, QuizError::InsufficientOptions { distinct: 2 }));
    }

    #[test]
    fn test_repeated_names_limit_directions() {
        let dataset = Dataset::new(
            "Oaks",
            vec![
                Plant::new(1, "Eik", "Quercus robur"),
                Plant::new(2, "Eik", "Quercus petraea"),
                Plant::new(3, "Beuk", "Fagus sylvatica"),
            ],
        )
        .unwrap();
        let subset = filter(&dataset, 1, 3).unwrap();
        assert_eq!(distinct_names(&subset, NameField::Common), 2);
        assert_eq!(distinct_names(&subset, NameField::Scientific), 3);

        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..50 {
            let question = next_question(&subset, &mut rng).unwrap();
            assert_eq!(question.direction, Direction::ScientificFromCommon);
            assert_eq!(question.options.len(), OPTION_COUNT);
        }

        let plant = subset.plants()[0].clone();
        let question =
            build_question(&subset, plant, Direction::ScientificFromCommon, &mut rng).unwrap();
        assert_eq!(question.correct_answer, "Quercus robur");
    }

    #[test]
    fn test_choices_start_with_placeholder() {
        let dataset = trees();
        let subset = filter(&dataset, 1, 3).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let question = next_question(&subset, &mut rng).unwrap();
        let choices = question.choices();
        assert_eq!(choices.len(), OPTION_COUNT + 1);
        assert_eq!(choices[0], NO_SELECTION);
        let options: Vec<&str> = question.options.iter().map(String::as_str).collect();
        assert_eq!(&choices[1..], options);
    }
}
