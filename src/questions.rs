use crate::config::QuizConfig;
use crate::error::PoolError;
use std::collections::HashMap;

/// One quiz prompt with its expected answer and a tag unique within its pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionItem {
    pub prompt: String,
    pub answer: i64,
    pub tag: String,
}

impl QuestionItem {
    pub fn new(prompt: impl Into<String>, answer: i64, tag: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            answer,
            tag: tag.into(),
        }
    }

    fn square(n: i64) -> Self {
        Self::new(format!("What is {n} squared?"), n * n, format!("{n}^2"))
    }

    fn square_root(n: i64) -> Self {
        let sq = n * n;
        Self::new(format!("What is the square root of {sq}?"), n, format!("√{sq}"))
    }

    fn cube(n: i64) -> Self {
        Self::new(format!("What is {n} cubed?"), n * n * n, format!("{n}^3"))
    }

    fn cube_root(n: i64) -> Self {
        let cu = n * n * n;
        Self::new(format!("What is the cube root of {cu}?"), n, format!("∛{cu}"))
    }
}

type MakeQuestion = fn(i64) -> QuestionItem;

fn generate(
    start: u32,
    end: u32,
    forward: Option<MakeQuestion>,
    root: Option<MakeQuestion>,
) -> Vec<QuestionItem> {
    let mut questions = Vec::new();
    for n in start..=end {
        let n = i64::from(n);
        if let Some(make) = forward {
            questions.push(make(n));
        }
        if let Some(make) = root {
            questions.push(make(n));
        }
    }
    questions
}

/// Squares (`n^2`) and square roots (`√n²`) for every n in `start..=end`.
///
/// For each n the square item comes before the root item. An empty range
/// (`start > end`) yields no questions.
pub fn generate_square_questions(
    start: u32,
    end: u32,
    include_square: bool,
    include_root: bool,
) -> Vec<QuestionItem> {
    generate(
        start,
        end,
        include_square.then_some(QuestionItem::square as MakeQuestion),
        include_root.then_some(QuestionItem::square_root as MakeQuestion),
    )
}

/// Cubes (`n^3`) and cube roots (`∛n³`) for every n in `start..=end`.
pub fn generate_cube_questions(
    start: u32,
    end: u32,
    include_cube: bool,
    include_root: bool,
) -> Vec<QuestionItem> {
    generate(
        start,
        end,
        include_cube.then_some(QuestionItem::cube as MakeQuestion),
        include_root.then_some(QuestionItem::cube_root as MakeQuestion),
    )
}

/// The master list of questions for a session, indexed by tag.
#[derive(Debug, Clone, Default)]
pub struct QuestionPool {
    items: Vec<QuestionItem>,
    by_tag: HashMap<String, usize>,
}

impl QuestionPool {
    /// Builds a pool, rejecting any repeated tag.
    pub fn new(items: Vec<QuestionItem>) -> Result<Self, PoolError> {
        let mut by_tag = HashMap::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            if by_tag.insert(item.tag.clone(), i).is_some() {
                return Err(PoolError::DuplicateTag(item.tag.clone()));
            }
        }
        Ok(Self { items, by_tag })
    }

    #[must_use]
    pub fn get(&self, tag: &str) -> Option<&QuestionItem> {
        self.by_tag.get(tag).map(|&i| &self.items[i])
    }

    #[must_use]
    pub fn items(&self) -> &[QuestionItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items for `tags`, in the order the tags are given. Unknown tags are skipped.
    pub fn select<S: AsRef<str>>(&self, tags: &[S]) -> Vec<QuestionItem> {
        tags.iter()
            .filter_map(|tag| self.get(tag.as_ref()).cloned())
            .collect()
    }
}

/// Builds the session pool: square-domain items first, then cube-domain items.
pub fn build_question_pool(config: &QuizConfig) -> Result<QuestionPool, PoolError> {
    let topics = config.topics;
    let mut questions = Vec::new();
    if topics.uses_squares() {
        questions.extend(generate_square_questions(
            config.square_start(),
            config.square_end,
            topics.squares,
            topics.square_roots,
        ));
    }
    if topics.uses_cubes() {
        questions.extend(generate_cube_questions(
            config.cube_start(),
            config.cube_end,
            topics.cubes,
            topics.cube_roots,
        ));
    }
    QuestionPool::new(questions)
}
