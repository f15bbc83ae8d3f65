use serde::{Deserialize, Serialize};

/// One of the four thinking-style quadrants of the profile.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    strum_macros::Display,
)]
pub enum Quadrant {
    A,
    B,
    C,
    D,
}

impl Quadrant {
    /// Iteration order; also the tie-break order for the dominant quadrant.
    pub const ALL: [Quadrant; 4] = [Quadrant::A, Quadrant::B, Quadrant::C, Quadrant::D];

    pub fn name(&self) -> &'static str {
        match self {
            Quadrant::A => "Pensador Analítico",
            Quadrant::B => "Pensador Prático",
            Quadrant::C => "Pensador Relacional",
            Quadrant::D => "Pensador Inovador",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Quadrant::A => "Lógico, Crítico, Analítico",
            Quadrant::B => "Organizado, Administrativo, Estruturado",
            Quadrant::C => "Empático, Colaborativo, Interpessoal",
            Quadrant::D => "Criativo, Inovador, Explorador",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub id: u32,
    pub quadrant: Quadrant,
    pub text: &'static str,
}

const fn q(id: u32, quadrant: Quadrant, text: &'static str) -> Question {
    Question { id, quadrant, text }
}

/// Labels for answers 1 through 5.
pub const LIKERT_LABELS: [&str; 5] = [
    "Discordo",
    "Discordo Um Pouco",
    "Neutro",
    "Concordo",
    "Concordo Totalmente",
];

pub const MIN_ANSWER: u8 = 1;
pub const MAX_ANSWER: u8 = 5;

pub const QUESTION_COUNT: usize = 25;

// Ids 1..=20 cycle through the quadrants in blocks of five; 21..=25 are
// mixed in afterwards, so A ends up with seven questions.
pub const QUESTIONS: [Question; QUESTION_COUNT] = [
    q(1, Quadrant::A, "Eu prefiro analisar os dados antes de tomar decisões"),
    q(2, Quadrant::A, "Gosto de entender o \"por quê\" das coisas em profundidade"),
    q(3, Quadrant::A, "Sou uma pessoa que segue a lógica e a razão"),
    q(4, Quadrant::A, "Prefiro precisão e fatos ao invés de opiniões"),
    q(5, Quadrant::A, "Gosto de resolver problemas complexos de forma metódica"),
    q(6, Quadrant::B, "Eu sou organizado e gosto de seguir procedimentos estabelecidos"),
    q(7, Quadrant::B, "Prefiro planejar e executar tarefas de forma estruturada"),
    q(8, Quadrant::B, "Gosto de resultados práticos e mensuráveis"),
    q(9, Quadrant::B, "Sou confiável e cumpro com as responsabilidades assumidas"),
    q(10, Quadrant::B, "Prefiro trabalhar dentro de regras e regulamentações claras"),
    q(11, Quadrant::C, "Eu valoro o trabalho em equipe e a colaboração"),
    q(12, Quadrant::C, "Gosto de ouvir e compreender os sentimentos das pessoas"),
    q(13, Quadrant::C, "Sou empático e me importo com o bem-estar dos outros"),
    q(14, Quadrant::C, "Prefiro ambientes harmoniosos e cooperativos"),
    q(15, Quadrant::C, "Gosto de construir relacionamentos sólidos e duradouros"),
    q(16, Quadrant::D, "Eu sou criativo e gosto de explorar novas ideias"),
    q(17, Quadrant::D, "Prefiro desafiar o status quo e propor mudanças"),
    q(18, Quadrant::D, "Gosto de trabalhar em projetos inovadores e estimulantes"),
    q(19, Quadrant::D, "Sou entusiasta com novas possibilidades e oportunidades"),
    q(20, Quadrant::D, "Prefiro experimentar e aprender com a prática"),
    q(21, Quadrant::A, "Gosto de questionar e analisar criticamente as informações"),
    q(22, Quadrant::B, "Sou eficiente na execução de tarefas e cumpro prazos"),
    q(23, Quadrant::C, "Eu sou alguém que inspira confiança nos outros"),
    q(24, Quadrant::D, "Gosto de aprender coisas novas e explorar diferentes abordagens"),
    q(25, Quadrant::A, "Prefiro ter informações completas antes de agir"),
];

pub fn question(id: u32) -> Option<&'static Question> {
    QUESTIONS.iter().find(|q| q.id == id)
}

pub fn count_in_quadrant(questions: &[Question], quadrant: Quadrant) -> usize {
    questions.iter().filter(|q| q.quadrant == quadrant).count()
}
