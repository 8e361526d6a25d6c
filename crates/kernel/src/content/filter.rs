//! Text filter pipeline.
//!
//! The host passes menu titles and tooltip attributes through its own text
//! filters before the kernel sanitizes them. Filters here only transform
//! text; they are not a security boundary.

/// Trait for text filters in the pipeline.
pub trait TextFilter: Send + Sync {
    /// Filter name for debugging.
    fn name(&self) -> &str;

    /// Process the input text and return filtered output.
    fn process(&self, input: &str) -> String;
}

/// Pipeline of text filters applied in sequence.
#[derive(Default)]
pub struct FilterPipeline {
    filters: Vec<Box<dyn TextFilter>>,
}

impl FilterPipeline {
    /// Create a new empty pipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline.
    pub fn add<F: TextFilter + 'static>(mut self, filter: F) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Trim and collapse whitespace, the usual treatment for menu labels.
    pub fn standard() -> Self {
        Self::new().add(TrimFilter).add(CollapseWhitespaceFilter)
    }

    /// Names of the registered filters, in order.
    pub fn names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Process text through all filters in the pipeline.
    pub fn process(&self, input: &str) -> String {
        self.filters
            .iter()
            .fold(input.to_string(), |acc, filter| filter.process(&acc))
    }
}

impl std::fmt::Debug for FilterPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterPipeline")
            .field("filters", &self.names())
            .finish()
    }
}

/// Strips leading and trailing whitespace.
pub struct TrimFilter;

impl TextFilter for TrimFilter {
    fn name(&self) -> &str {
        "trim"
    }

    fn process(&self, input: &str) -> String {
        input.trim().to_string()
    }
}

/// Collapses runs of whitespace (including newlines) into one space.
pub struct CollapseWhitespaceFilter;

impl TextFilter for CollapseWhitespaceFilter {
    fn name(&self) -> &str {
        "collapse_whitespace"
    }

    fn process(&self, input: &str) -> String {
        input.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

/// Adapter turning a closure into a named filter.
pub struct FnFilter<F> {
    name: String,
    func: F,
}

impl<F> FnFilter<F>
where
    F: Fn(&str) -> String + Send + Sync,
{
    pub fn new(name: &str, func: F) -> Self {
        Self {
            name: name.to_string(),
            func,
        }
    }
}

impl<F> TextFilter for FnFilter<F>
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn process(&self, input: &str) -> String {
        (self.func)(input)
    }
}
