/// Phrases typed in each phase, in order.
pub const PHRASES: [&str; 3] = [
    "A tecnologia transforma a forma como trabalhamos todos os dias.",
    "A análise de dados é essencial para decisões estratégicas.",
    "Velocidade e precisão são fundamentais em ambientes corporativos.",
];

pub const PHASE_COUNT: usize = PHRASES.len();

pub fn phrase(phase_index: usize) -> Option<&'static str> {
    PHRASES.get(phase_index).copied()
}
