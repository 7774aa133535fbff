use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "eisen", about = concat!("[!] eisen v", env!("CARGO_PKG_VERSION"), " - priorize tarefas pela matriz de Eisenhower"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Saída em JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Rodar em outro diretório
    #[arg(short = 'C', long = "dir", global = true)]
    pub dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Criar o diretório eisen/ no diretório atual
    Init(InitArgs),
    /// Adicionar uma tarefa
    Add(AddArgs),
    /// Listar as tarefas em ordem de prioridade
    List(ListArgs),
    /// Mostrar uma tarefa com suas subtarefas
    Show(IdArg),
    /// Adicionar uma subtarefa a uma tarefa
    Sub(SubArgs),
    /// Marcar/desmarcar uma subtarefa
    Check(CheckArgs),
    /// Concluir uma tarefa (e todas as subtarefas)
    Done(IdArg),
    /// Reabrir uma tarefa (e todas as subtarefas)
    Reopen(IdArg),
    /// Remover uma tarefa, ou uma subtarefa dela
    Rm(RmArgs),
    /// Expandir/recolher as subtarefas de uma tarefa
    Expand(IdArg),
    /// Apagar todas as tarefas
    Clear(ClearArgs),
    /// Alternar ou definir o tema (light/dark)
    Theme(ThemeArgs),
}

#[derive(Args)]
pub struct InitArgs {
    /// Recriar mesmo se eisen/ já existir
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct AddArgs {
    /// Texto da tarefa
    pub text: String,
    /// Urgente
    #[arg(short, long)]
    pub urgent: bool,
    /// Importante
    #[arg(short, long)]
    pub important: bool,
}

#[derive(Args)]
pub struct ListArgs {
    /// Mostrar tudo: tarefas concluídas e todas as subtarefas
    #[arg(long)]
    pub all: bool,
}

#[derive(Args)]
pub struct IdArg {
    /// Id da tarefa
    pub id: u64,
}

#[derive(Args)]
pub struct SubArgs {
    /// Id da tarefa pai
    pub id: u64,
    /// Texto da subtarefa
    pub text: String,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Id da tarefa pai
    pub id: u64,
    /// Id da subtarefa
    pub sub_id: u64,
}

#[derive(Args)]
pub struct RmArgs {
    /// Id da tarefa
    pub id: u64,
    /// Id da subtarefa (se omitido, remove a tarefa inteira)
    pub sub_id: Option<u64>,
}

#[derive(Args)]
pub struct ClearArgs {
    /// Não pedir confirmação
    #[arg(long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct ThemeArgs {
    /// "light" ou "dark" (se omitido, alterna)
    pub mode: Option<String>,
}
