use common::lifecycle::Completion;

pub enum Msg {
    InputChanged(String),
    Submit,
    Settled(Completion),
}
