//! Static didactic content for the UD3 unit.
//!
//! The worksheet renders fixed teaching text alongside the editable
//! sections: the three-model theory overview, the debate prompt with
//! suggested argument lines, the reading axes, and the deliverables rubric.
//! All of it is immutable course material.

/// Theory overview: the three trust models and their compared keys.
pub const THEORY: &str = "\
Tres modelos de confianza y su lógica

Institucional (TTP): autoridad, procedimiento, responsabilidad pública.
Social (reputación): normas, comunidad, redes de confianza, sanción social.
Algorítmica (blockchain): reglas de consenso, criptografía, réplica, automatización (smart contracts).

Claves comparadas
- Garantía principal: fe pública | reputación | inmutabilidad probabilística.
- Mecanismo: validación formal | evaluación social | verificación criptográfica y consenso.
- Riesgos típicos: error humano/corrupción | colusión/manipulación | bugs/gobernanza de protocolo.
- Efectos frente a terceros: reconocimiento jurídico | legitimidad comunitaria | depende del marco normativo.

Idea-faro: la blockchain no elimina el Derecho; mueve parte de la validación
al código + red. El encaje jurídico sigue importando.
";

/// Debate prompt and suggested argument lines per stance.
pub const DEBATE_PROMPT: &str = "\
Debate: \"¿Es la blockchain una nueva forma de Derecho?\"

Instrucción: elige postura inicial y redacta tesis (1), tres argumentos (3),
contraargumento (1) y matiz final (1). Apóyate en los modelos de confianza y
en el encaje normativo.

Sugerencias de línea argumental (orientativas)
- Sí: el código regula conductas y genera efectos predecibles; smart contracts como \"normas ejecutables\".
- No: el Derecho implica legitimidad democrática, interpretación y garantías; el código carece de jurisdicción y debido proceso.
- Depende: código + normas + gobernanza; la blockchain complementa funciones (integridad/trazabilidad) pero no reemplaza oponibilidad ni garantías sin reconocimiento legal.
";

/// Reading axes and guiding questions for De Filippi (2018).
pub const READING: &str = "\
Lectura complementaria — Primavera De Filippi (2018): Blockchain and the Law

Ejes para UD3
- Arquitectura descentralizada y gobernanza del protocolo.
- Lex cryptographica: qué puede y qué no puede \"regular\" el código.
- Interoperabilidad con el ordenamiento (identidad, jurisdicción, responsabilidad).

Preguntas guía
1) ¿Qué funciones jurídicas se desplazan al código y cuáles permanecen en la norma?
2) ¿Cómo se articula la responsabilidad cuando la validación es distribuida?
3) ¿Qué dependencias jurídicas persisten para lograr oponibilidad?
";

/// Deliverables rubric and closing summary.
pub const RUBRIC: &str = "\
Rúbrica general: precisión conceptual (40%), claridad y argumentación (30%),
aplicación a casos/encaje jurídico (30%).

Conclusión UD3: describe el cambio de paradigma en la validación jurídica:
de la autoridad y la reputación hacia una validación algorítmica replicada,
sin perder de vista la oponibilidad y la responsabilidad en el ordenamiento.
";
