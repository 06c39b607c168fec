/// Input value paired with a log of messages produced by filters
///
/// Filters receive `&mut ChainInput<I, M>` and can both work on the wrapped
/// value and leave notes behind (diagnostics, failure reasons, compensation
/// records) for the caller to inspect after the run.
///
/// # Example
///
/// ```ignore
/// let mut input = ChainInput::<Order, String>::new(order);
/// chain.run(ChainBehavior::StopOnFailure, &mut input);
///
/// for message in input.messages() {
///     println!("{}", message);
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChainInput<I, M = String> {
    input: I,
    messages: Vec<M>,
}

impl<I, M> ChainInput<I, M> {
    pub fn new(input: I) -> Self {
        Self {
            input,
            messages: Vec::new(),
        }
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// Record a message, in call order
    pub fn push(&mut self, message: M) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[M] {
        &self.messages
    }

    pub fn into_inner(self) -> I {
        self.input
    }

    pub fn into_parts(self) -> (I, Vec<M>) {
        (self.input, self.messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_keep_order() {
        let mut input: ChainInput<u32> = ChainInput::new(7);
        *input.input_mut() += 1;
        input.push("first".to_string());
        input.push("second".to_string());

        assert_eq!(*input.input(), 8);
        assert_eq!(input.messages(), ["first", "second"]);

        let (value, messages) = input.into_parts();
        assert_eq!(value, 8);
        assert_eq!(messages.len(), 2);
    }
}
